use colored::Color;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

/// Report line color by relative gain: at or below the reference score is
/// good (scores are time-like, lower is better).
pub fn gain_color(relative_gain: f64) -> Color {
    if relative_gain <= 0.0 {
        Color::Green
    } else {
        Color::BrightRed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gain_coloring() {
        assert_eq!(gain_color(-12.5), Color::Green);
        assert_eq!(gain_color(0.0), Color::Green);
        assert_eq!(gain_color(2000.0), Color::BrightRed);
    }
}
