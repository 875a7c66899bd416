//! Paint style tokens.

use alloc::borrow::Cow;
use alloc::string::String;

/// An immutable CSS color string used for stroke and fill selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const WHITE: Color = Color(Cow::Borrowed("#FFF"));
    pub const RED: Color = Color(Cow::Borrowed("#F00"));
    pub const BLACK: Color = Color(Cow::Borrowed("#000"));
    pub const GRAY: Color = Color(Cow::Borrowed("#888"));
    pub const GREEN: Color = Color(Cow::Borrowed("#0F0"));
    pub const BLUE: Color = Color(Cow::Borrowed("#00F"));
    pub const MAGENTA: Color = Color(Cow::Borrowed("#F0F"));
    pub const ORANGE: Color = Color(Cow::Borrowed("#F60"));

    /// Any CSS color value, e.g. `"#7D9999"` or `"rgba(0,0,0,0.5)"`.
    pub fn custom(value: impl Into<String>) -> Self {
        Color(Cow::Owned(value.into()))
    }

    pub fn as_css(&self) -> &str {
        &self.0
    }
}
