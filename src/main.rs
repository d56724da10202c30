fn main() -> std::process::ExitCode {
    pph_risk_lib::run()
}
