use driftnet::Backdrop;

fn main() {
    if let Err(e) = Backdrop::new().run() {
        eprintln!("driftnet: {}", e);
        std::process::exit(1);
    }
}
