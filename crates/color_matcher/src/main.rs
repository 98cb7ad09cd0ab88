fn main() {
    color_matcher::run();
}
