fn main() {
    std::process::exit(cmdfeed::app::startup::startup());
}
