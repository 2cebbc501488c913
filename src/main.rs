fn main() {
    hexuki::board::init();
    hexuki::console::run();
}
