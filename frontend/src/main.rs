fn main() {
    pi_dashboard_frontend::run();
}
