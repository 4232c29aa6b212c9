//! width-to-layout boundary
//!
//! field widths are declared as 25/50/75/100 percent; anything else,
//! or mobile view, collapses to full width. the CSS class strings are
//! the renderer contract and are fixed.

/// layout fraction for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl WidthClass {
    /// the renderer's CSS class for this fraction
    pub fn css_class(&self) -> &'static str {
        match self {
            WidthClass::Quarter => "w-full sm:w-1/4",
            WidthClass::Half => "w-full sm:w-1/2",
            WidthClass::ThreeQuarters => "w-full sm:w-3/4",
            WidthClass::Full => "w-full",
        }
    }
}

/// map a declared width to its layout class
pub fn width_class(width: Option<u32>, mobile_view: bool) -> WidthClass {
    if mobile_view {
        return WidthClass::Full;
    }
    match width.unwrap_or(100) {
        25 => WidthClass::Quarter,
        50 => WidthClass::Half,
        75 => WidthClass::ThreeQuarters,
        _ => WidthClass::Full,
    }
}
