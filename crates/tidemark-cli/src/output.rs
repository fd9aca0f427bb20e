pub fn print_banner() {
    println!(
        "{} {}",
        tidemark_core::engine_name(),
        env!("CARGO_PKG_VERSION")
    );
}
