#[tokio::main]
async fn main() {
    smallie::start_server().await;
}
