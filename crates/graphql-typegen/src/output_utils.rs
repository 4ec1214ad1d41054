pub(crate) const GREEN_CHECK: &str = "\u{2713}";
pub(crate) const RED_X: &str = "\u{2717}";
