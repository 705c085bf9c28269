fn main() {
    share_me::run();
}
