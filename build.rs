fn main() {
    // version information for the command line tools
    built::write_built_file().expect("Failed to acquire build-time information");
}
