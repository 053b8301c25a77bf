//! TCP リスナーの例 (tokio)
//!
//! 接続ごとにリクエストヘッダーを 1 つ読み取り、リクエストラインとヘッダーを表示する。
//! レスポンスは返さない。
//!
//! 使い方:
//!   cargo run -p tcp_listener
//!   curl http://127.0.0.1:42069/coffee
//!
//! パースイベントを見る場合:
//!   RUST_LOG=debug cargo run -p tcp_listener

use std::net::SocketAddr;
use std::time::Duration;

use incremental_http11::{ParserLimits, Request};
use tokio_incremental_http11::Server;

struct ListenerOptions {
    host: String,
    port: u16,
    read_timeout: Duration,
    max_buffer_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args()?;

    let addr = format!("{}:{}", options.host, options.port);
    let limits = ParserLimits {
        max_buffer_size: options.max_buffer_size,
        ..ParserLimits::default()
    };
    let server = Server::bind(&addr)
        .await?
        .read_timeout(options.read_timeout)
        .limits(limits);

    log::info!("listening on {}", server.local_addr()?);
    server.serve(print_request).await?;
    Ok(())
}

async fn print_request(request: Request, peer_addr: SocketAddr) {
    let Some(line) = request.request_line() else {
        return;
    };
    log::info!("{} {} from {}", line.method, line.target, peer_addr);

    println!("Request line:");
    println!("- Method: {}", line.method);
    println!("- Target: {}", line.target);
    println!("- Version: {}", line.version);
    println!("Headers:");
    let mut headers: Vec<_> = request.headers().iter().collect();
    headers.sort();
    for (name, value) in headers {
        println!("- {}: {}", name, value);
    }
}

fn parse_args() -> Result<ListenerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "tcp_listener";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --host オプション
    let host: String = noargs::opt("host")
        .doc("Address to listen on")
        .default("127.0.0.1")
        .take(&mut args)
        .then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("42069")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --read-timeout オプション (秒)
    let read_timeout: u64 = noargs::opt("read-timeout")
        .doc("Read timeout in seconds")
        .default("30")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --max-buffer-size オプション
    let max_buffer_size: usize = noargs::opt("max-buffer-size")
        .doc("Maximum bytes buffered for one request head")
        .default("65536")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ListenerOptions {
        host,
        port,
        read_timeout: Duration::from_secs(read_timeout),
        max_buffer_size,
    })
}
