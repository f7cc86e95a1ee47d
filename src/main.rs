fn main() {
    #[cfg(feature = "cli")]
    polyline_codec::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("polyline-codec: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
