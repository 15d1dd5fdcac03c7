pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("CARGO_PKG_NAME"),
        ", h3 via h3o)"
    )
}
