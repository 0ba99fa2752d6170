//! Support for library configuration options

use std::sync::{Arc, Mutex};

use csscolorparser::Color;
use once_cell::sync::Lazy;

/// The color of the dot put on calendar days that still have unfinished tasks.
/// Feel free to override it when initing this library.
pub static DOT_COLOR: Lazy<Arc<Mutex<Color>>> = Lazy::new(|| {
    Arc::new(Mutex::new(
        "#f06292".parse().unwrap(/* this cannot panic since this is a valid CSS color */),
    ))
});
