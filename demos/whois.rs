use std::env;

#[tokio::main]
async fn main() {
    let address = env::args().nth(1).unwrap();

    let cymru = aslookup::CymruWhois::new().lookup(&address).await;
    println!("{:#?}", cymru)
}
