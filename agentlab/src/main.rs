fn main() {
    if let Err(e) = agentlab::run_cli() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}
