fn main() {
    holdem_digest::cli::run();
}
