use std::env;

use nextstep_assistant::Assistant;
use nextstep_core::config::Config;
use nextstep_core::types::{Category, ChatResult};

const USAGE: &str = "Usage: nextstep <chat|stats|categories|resources> [args...]
  chat \"<message>\" [--category <id>] [--json]
  stats [--json]
  categories
  resources [--category <id>]";

struct Args {
    cmd: String,
    positional: Vec<String>,
    category: Option<String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { eprintln!("{USAGE}"); std::process::exit(1); }
    let cmd = args.remove(0);
    let mut parsed = Args { cmd, positional: Vec::new(), category: None, json: false };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--category" | "-c" => match iter.next() {
                Some(value) => parsed.category = Some(value),
                None => { eprintln!("--category needs a value"); std::process::exit(1) }
            },
            _ => parsed.positional.push(arg),
        }
    }
    parsed
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_chat(result: &ChatResult) {
    println!("{}", result.response_text);
    if result.top_resources.is_empty() { return; }
    println!();
    match result.resolved_category {
        Some(category) => println!("{} of {} matching resources ({})", result.top_resources.len(), result.resources_found, category.display_name()),
        None => println!("{} of {} matching resources", result.top_resources.len(), result.resources_found),
    }
    for (i, ranked) in result.top_resources.iter().enumerate() {
        let r = &ranked.record;
        println!("{:>2}. [{:.2}] {} {} ({})", i + 1, ranked.score, r.category.icon(), r.name, r.id);
        if let Some(phone) = &r.phone { println!("      phone: {phone}"); }
        if let Some(address) = &r.address { println!("      address: {address}"); }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let args = parse_args();
    let base = env::current_dir()?;

    match args.cmd.as_str() {
        "chat" => {
            let message = args.positional.join(" ");
            if message.trim().is_empty() { eprintln!("Usage: nextstep chat \"<message>\" [--category <id>]"); std::process::exit(1) }
            let assistant = Assistant::from_settings(&settings, &base)?;
            let runtime = tokio::runtime::Runtime::new()?;
            let result = runtime.block_on(assistant.chat(&message, args.category.as_deref()))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_chat(&result);
            }
        }
        "stats" => {
            let assistant = Assistant::from_settings(&settings, &base)?;
            let stats = assistant.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total resources: {}", stats.total_resources);
                println!("Categories: {}", stats.categories);
                for (category, count) in &stats.category_breakdown {
                    println!("  {} {:<20} {}", category.icon(), category.display_name(), count);
                }
                println!("Last updated: {}", stats.last_updated.to_rfc3339());
            }
        }
        "categories" => {
            for info in Category::ALL.iter().map(|c| c.info()) {
                println!("{} {:<24} {}", info.icon, info.id.as_str(), info.name);
            }
        }
        "resources" => {
            let assistant = Assistant::from_settings(&settings, &base)?;
            let records = match args.category.as_deref() {
                Some(raw) => assistant.get_by_category(raw.parse::<Category>()?),
                None => assistant.get_all_resources(),
            };
            for r in &records {
                println!("{:<14} {:<24} {}", r.id, r.category.as_str(), r.name);
            }
            println!("{} resources", records.len());
        }
        _ => { eprintln!("Unknown command: {}\n{USAGE}", args.cmd); std::process::exit(1); }
    }
    Ok(())
}
