fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match anilauncher_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[anilauncher] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = anilauncher_core::runtime::run_with_options(options) {
        anilauncher_core::logging::error(&format!("runtime failed: {error}"));
        eprintln!("[anilauncher] runtime failed: {error}");
        std::process::exit(1);
    }
}
