// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! opt_cell {
    // Nullable output cell: None → "", Some(v) → v.to_string()
    ($opt:expr) => {
        match &$opt {
            Some(v) => v.to_string(),
            None => ::std::string::String::new(),
        }
    };
}
