//! Interactive session framing.

use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    crate::status!(
        "{} {} - Interactive Sentiment Mode",
        Style::header("sentiment"),
        Style::version(format!("v{VERSION}"))
    );
    crate::status!();
}

pub fn print_goodbye() {
    crate::status!("{}", Style::success("Goodbye!"));
}
