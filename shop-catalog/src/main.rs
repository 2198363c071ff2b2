use std::sync::Arc;

use shop_catalog::repl::{self, ReplCommand};
use shop_catalog::{CatalogController, CatalogHandle, CatalogResult, Config, logger};
use shop_client::NetworkHttpClient;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Shop catalog starting against {}", config.client.base_url);

    // 2. 挂载控制器
    let api = Arc::new(NetworkHttpClient::new(&config.client, config.session())?);
    let handle = CatalogController::mount(api, config.mount_options());

    // 3. 视图变化时打印
    let mut views = handle.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            println!("{}", repl::render_view(&view));
        }
    });

    println!("{}", repl::HELP);

    // 4. 读取命令
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match repl::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", repl::HELP),
            ReplCommand::Show => println!("{}", repl::render_view(&handle.view())),
            command => {
                if let Err(e) = dispatch(&handle, command) {
                    tracing::error!("Catalog command failed: {e}");
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
    printer.abort();
    tracing::info!("Shop catalog stopped");
    Ok(())
}

fn dispatch(handle: &CatalogHandle, command: ReplCommand) -> CatalogResult<()> {
    match command {
        ReplCommand::Category(category) => handle.set_category(category),
        ReplCommand::Size(size) => handle.toggle_size(size),
        ReplCommand::Color(color) => handle.toggle_color(color),
        ReplCommand::Price(bound, value) => handle.set_price_bound(bound, value),
        ReplCommand::Sort(option) => handle.set_sort_option(option),
        ReplCommand::Clear => handle.clear_all(),
        ReplCommand::Retry => handle.retry(),
        ReplCommand::Categories => handle.refresh_categories(),
        ReplCommand::Show | ReplCommand::Help | ReplCommand::Quit => Ok(()),
    }
}
