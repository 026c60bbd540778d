use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use rustsale::{
    core::config::SaleConfig,
    core::error::SaleError,
    core::types::SaleQuote,
    strategies::{global_registry, Behavior, StrategyContext},
    utils::{
        create_default_config,
        unified_logger::{init_logger, LogConfig},
    },
};

fn cli() -> Command {
    Command::new("rustsale")
        .version(env!("CARGO_PKG_VERSION"))
        .about("销售计价策略切换演示")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径(YAML/TOML)，缺省使用内置的 regular/discount/foreign"),
        )
        .arg(
            Arg::new("amount")
                .short('a')
                .long("amount")
                .value_name("AMOUNT")
                .value_parser(parse_amount)
                .allow_negative_numbers(true)
                .default_value("10")
                .help("计价金额"),
        )
        .arg(
            Arg::new("behavior")
                .short('s')
                .long("behavior")
                .value_name("NAME")
                .help("初始策略，缺省为 sale.default_behavior"),
        )
        .arg(
            Arg::new("then")
                .long("then")
                .value_name("NAME")
                .value_delimiter(',')
                .num_args(1..)
                .help("依次切换的策略，每次切换后重新计算；缺省为其余全部策略"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("以JSON行输出报价"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("列出已配置的策略后退出"),
        )
}

fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenv::dotenv().ok();

    let matches = cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            SaleConfig::from_file(path).with_context(|| format!("加载配置失败: {}", path))?
        }
        None => create_default_config(),
    };

    if let Err(e) = init_logger(&LogConfig::with_level(config.sale.log_level.clone())) {
        eprintln!("日志初始化失败: {}", e);
    }

    if let Err(err) = run(&matches, &config) {
        match err.downcast_ref::<SaleError>() {
            Some(sale_err) => log::log!(sale_err.log_level(), "❌ {}", sale_err),
            None => log::error!("❌ {:#}", err),
        }
        return Err(err);
    }
    Ok(())
}

fn run(matches: &clap::ArgMatches, config: &SaleConfig) -> anyhow::Result<()> {
    let set = global_registry().build_all(config)?;

    if matches.get_flag("list") {
        for entry in &config.behaviors {
            let marker = if entry.name == config.sale.default_behavior {
                "*"
            } else {
                " "
            };
            let params = set
                .get(&entry.name)
                .map(|behavior| behavior.describe())
                .unwrap_or_default();
            println!("{} {:<12} {:<18} {}", marker, entry.name, entry.kind, params);
        }
        return Ok(());
    }

    let amount = *matches
        .get_one::<f64>("amount")
        .context("缺少计价金额")?;
    let json = matches.get_flag("json");

    let initial = matches
        .get_one::<String>("behavior")
        .map(String::as_str)
        .unwrap_or(config.sale.default_behavior.as_str());
    let then: Option<Vec<String>> = matches
        .get_many::<String>("then")
        .map(|values| values.cloned().collect());

    // 先解析完整序列，名称有误时不输出任何报价
    let sequence = set.resolve_sequence(initial, then.as_deref())?;
    let mut behaviors = sequence.into_iter();
    let first = behaviors
        .next()
        .ok_or_else(|| SaleError::ConstructionError("切换序列为空".to_string()))?;

    let mut sale = StrategyContext::new(first);
    emit(&sale.quote(amount)?, json)?;

    for behavior in behaviors {
        sale.set_behavior(behavior);
        emit(&sale.quote(amount)?, json)?;
    }

    Ok(())
}

/// 计价金额必须为有限数值
fn parse_amount(raw: &str) -> Result<f64, String> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("无效金额 {}: {}", raw, e))?;
    if !amount.is_finite() {
        return Err(format!("金额必须为有限数值: {}", raw));
    }
    Ok(amount)
}

fn emit(quote: &SaleQuote, json: bool) -> anyhow::Result<()> {
    log::info!(
        "策略 {} 计算完成: {} -> {}",
        quote.behavior,
        quote.amount,
        quote.total
    );
    if json {
        println!("{}", quote.to_json()?);
    } else {
        println!(
            "{:<12} {:>12.4} -> {:>12.4} ({:+.4})",
            quote.behavior,
            quote.amount,
            quote.total,
            quote.adjustment()
        );
    }
    Ok(())
}
