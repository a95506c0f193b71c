//! Fit-to-screen scaling helper.

/// Which viewport axes bound the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Fit inside both axes.
    #[default]
    Both,
    /// Bound by width only.
    Width,
    /// Bound by height only.
    Height,
    /// Keep the original scale.
    None,
}

/// Inputs for [`fit_to_screen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub element_width: f32,
    pub element_height: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Largest fraction of the screen width the element may cover.
    pub max_ratio_width: f32,
    /// Largest fraction of the screen height the element may cover.
    pub max_ratio_height: f32,
    /// Scale returned by [`ScaleMode::None`].
    pub original_scale: f32,
    pub mode: ScaleMode,
    /// Allow results above 1.
    pub allow_upscale: bool,
}

impl FitOptions {
    pub fn new(element_width: f32, element_height: f32, screen_width: f32, screen_height: f32) -> Self {
        Self {
            element_width,
            element_height,
            screen_width,
            screen_height,
            max_ratio_width: 1.0,
            max_ratio_height: 1.0,
            original_scale: 1.0,
            mode: ScaleMode::Both,
            allow_upscale: false,
        }
    }

    pub fn with_mode(mut self, mode: ScaleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_ratio(mut self, width: f32, height: f32) -> Self {
        self.max_ratio_width = width;
        self.max_ratio_height = height;
        self
    }

    pub fn with_upscale(mut self, allow: bool) -> Self {
        self.allow_upscale = allow;
        self
    }
}

/// Compute the scale that fits an element into the screen.
///
/// Degenerate element sizes yield a scale of 1 on that axis.
pub fn fit_to_screen(options: &FitOptions) -> f32 {
    if options.mode == ScaleMode::None {
        return if options.original_scale != 0.0 {
            options.original_scale
        } else {
            1.0
        };
    }

    let max_w = options.screen_width * options.max_ratio_width;
    let max_h = options.screen_height * options.max_ratio_height;

    let by_width = axis_scale(max_w, options.element_width);
    let by_height = axis_scale(max_h, options.element_height);

    let scale = match options.mode {
        ScaleMode::Width => by_width,
        ScaleMode::Height => by_height,
        ScaleMode::Both => by_width.min(by_height),
        ScaleMode::None => unreachable!(),
    };

    if options.allow_upscale {
        scale
    } else {
        scale.min(1.0)
    }
}

fn axis_scale(max: f32, element: f32) -> f32 {
    if element > 0.0 { max / element } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_none_returns_original_scale() {
        let mut opts = FitOptions::new(100.0, 100.0, 50.0, 50.0).with_mode(ScaleMode::None);
        opts.original_scale = 0.5;
        assert_eq!(fit_to_screen(&opts), 0.5);

        opts.original_scale = 0.0;
        assert_eq!(fit_to_screen(&opts), 1.0);
    }

    #[test]
    fn test_single_axis_modes() {
        let opts = FitOptions::new(300.0, 300.0, 200.0, 150.0);
        assert!(approx_eq(fit_to_screen(&opts.with_mode(ScaleMode::Width)), 200.0 / 300.0));
        assert!(approx_eq(fit_to_screen(&opts.with_mode(ScaleMode::Height)), 0.5));
        assert!(approx_eq(fit_to_screen(&opts), 0.5));
    }

    #[test]
    fn test_max_ratio() {
        let opts = FitOptions::new(300.0, 300.0, 200.0, 200.0)
            .with_mode(ScaleMode::Height)
            .with_max_ratio(1.0, 1.2);
        assert!(approx_eq(fit_to_screen(&opts), 0.8));
    }

    #[test]
    fn test_upscale_cap() {
        let opts = FitOptions::new(100.0, 100.0, 1000.0, 1000.0);
        assert_eq!(fit_to_screen(&opts), 1.0);
        assert!(approx_eq(fit_to_screen(&opts.with_upscale(true)), 10.0));
    }

    #[test]
    fn test_degenerate_element() {
        let opts = FitOptions::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(fit_to_screen(&opts), 1.0);
    }
}
