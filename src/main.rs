//! # hashbench
//!
//! 命令行入口：按给定成本参数测量 bcrypt 与 Argon2id 的哈希耗时。
//!
//! ```bash
//! # 使用默认参数（cost 12, t=2, m=16384 KiB, p=2）
//! hashbench
//!
//! # JSON 输出
//! hashbench run --bcrypt-cost 10 --argon-memory-kib 32768 --format json
//!
//! # 观察 bcrypt cost 从 4 到 12 的耗时增长
//! hashbench sweep --param bcrypt-cost --from 4 --to 12
//! ```

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hashbench::error::ConfigError;
use hashbench::render::{DEFAULT_BAR_WIDTH, render_bar_chart, render_sweep, render_table};
use hashbench::{BenchmarkRequest, Error, ParameterBounds, SweepParameter, run, sweep};

/// 哈希开始前输入被拒绝（参数越界或配置错误）时的退出码
const EXIT_INVALID_INPUT: i32 = 2;
/// 其余错误（例如报告序列化失败）的退出码
const EXIT_FAILURE: i32 = 1;

/// 一次扫描最多的取值个数
const MAX_SWEEP_POINTS: u64 = 64;

#[derive(Parser)]
#[command(author, version, about = "Compare bcrypt and Argon2id hashing cost", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    costs: CostArgs,

    /// 使用算法允许的完整范围，而不是推荐范围
    #[arg(long, global = true)]
    unbounded: bool,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Commands {
    /// 执行一次基准测试（默认）
    Run {
        /// 输出格式
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 固定其余参数，扫描单个成本参数
    Sweep {
        /// 要扫描的参数
        #[arg(long, value_name = "PARAM")]
        param: SweepParameter,

        /// 起始值（含）
        #[arg(long)]
        from: u32,

        /// 结束值（含）
        #[arg(long)]
        to: u32,

        /// 步长
        #[arg(long, default_value_t = 1)]
        step: u32,
    },
}

#[derive(Args)]
struct CostArgs {
    /// 被哈希的明文
    #[arg(
        long,
        env = "HASHBENCH_SECRET",
        hide_env_values = true,
        default_value = "senha123",
        global = true
    )]
    secret: String,

    /// bcrypt cost（工作量 2^cost）
    #[arg(long, env = "HASHBENCH_BCRYPT_COST", default_value_t = 12, global = true)]
    bcrypt_cost: u32,

    /// Argon2id 迭代次数
    #[arg(long, env = "HASHBENCH_ARGON_TIME_COST", default_value_t = 2, global = true)]
    argon_time_cost: u32,

    /// Argon2id 内存成本（KiB）
    #[arg(long, env = "HASHBENCH_ARGON_MEMORY_KIB", default_value_t = 16384, global = true)]
    argon_memory_kib: u32,

    /// Argon2id 并行度
    #[arg(long, env = "HASHBENCH_ARGON_PARALLELISM", default_value_t = 2, global = true)]
    argon_parallelism: u32,

    /// Argon2id 输出长度（字节）
    #[arg(long, default_value_t = 32, global = true)]
    argon_hash_length: usize,
}

impl Cli {
    /// `--unbounded` 时使用宽松范围
    fn bounds(&self) -> ParameterBounds {
        if self.unbounded {
            ParameterBounds::permissive()
        } else {
            ParameterBounds::recommended()
        }
    }

    /// 未给出子命令时执行 `run`
    fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run {
            format: OutputFormat::Table,
        })
    }
}

impl CostArgs {
    fn to_request(&self) -> BenchmarkRequest {
        BenchmarkRequest::new(&self.secret)
            .with_bcrypt_cost(self.bcrypt_cost)
            .with_argon_time_cost(self.argon_time_cost)
            .with_argon_memory_kib(self.argon_memory_kib)
            .with_argon_parallelism(self.argon_parallelism)
            .with_argon_hash_length(self.argon_hash_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            process::exit(exit_code(&e));
        }
    }
}

fn execute(cli: &Cli) -> Result<String, Error> {
    let bounds = cli.bounds();
    let request = cli.costs.to_request();
    info!(?request, unbounded = cli.unbounded, "parsed benchmark request");

    match cli.resolved_command() {
        Commands::Run { format } => run_once(request, &bounds, format),
        Commands::Sweep {
            param,
            from,
            to,
            step,
        } => {
            let values = sweep_values(from, to, step)?;
            run_sweep(&request, &bounds, param, values)
        }
    }
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Parameter(_) | Error::Config(_) => EXIT_INVALID_INPUT,
        Error::Algorithm(_) | Error::Internal(_) => EXIT_FAILURE,
    }
}

fn run_once(
    request: BenchmarkRequest,
    bounds: &ParameterBounds,
    format: OutputFormat,
) -> Result<String, Error> {
    request.check_bounds(bounds)?;
    let report = run(request);

    match format {
        OutputFormat::Json => Ok(format!("{}\n", report.to_json()?)),
        OutputFormat::Table => Ok(format!(
            "Hash timing (seconds)\n\n{}\n{}",
            render_table(&report),
            render_bar_chart(&report, DEFAULT_BAR_WIDTH)
        )),
    }
}

/// 计算 `from..=to` 按 `step` 取到的值，个数不超过 [`MAX_SWEEP_POINTS`]
fn sweep_values(from: u32, to: u32, step: u32) -> Result<Vec<u32>, Error> {
    if step == 0 {
        return Err(invalid_value("step", "must be at least 1".to_string()));
    }
    if from > to {
        return Err(invalid_value(
            "from",
            format!("{} is greater than --to {}", from, to),
        ));
    }

    let count = u64::from(to - from) / u64::from(step) + 1;
    if count > MAX_SWEEP_POINTS {
        return Err(invalid_value(
            "to",
            format!(
                "sweep would take {} values, at most {} are allowed",
                count, MAX_SWEEP_POINTS
            ),
        ));
    }

    Ok((from..=to).step_by(step as usize).collect())
}

fn invalid_value(key: &str, message: String) -> Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
    .into()
}

fn run_sweep(
    request: &BenchmarkRequest,
    bounds: &ParameterBounds,
    parameter: SweepParameter,
    values: Vec<u32>,
) -> Result<String, Error> {
    for value in &values {
        parameter.apply(request.clone(), *value).check_bounds(bounds)?;
    }

    let points = sweep(request, parameter, values);
    Ok(render_sweep(parameter, &points))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use hashbench::error::ParameterError;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn config_key(err: &Error) -> Option<&str> {
        match err {
            Error::Config(ConfigError::InvalidValue { key, .. }) => Some(key),
            _ => None,
        }
    }

    #[test]
    fn test_run_is_default_command() {
        let cli = parse(&["hashbench"]);
        assert!(cli.command.is_none());
        assert_eq!(
            cli.resolved_command(),
            Commands::Run {
                format: OutputFormat::Table,
            }
        );
        assert_eq!(cli.bounds(), ParameterBounds::recommended());
    }

    #[test]
    fn test_defaults_match_initial_values() {
        let request = parse(&["hashbench"]).costs.to_request();
        assert_eq!(request, BenchmarkRequest::default());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&[
            "hashbench",
            "run",
            "--format",
            "json",
            "--bcrypt-cost",
            "10",
            "--argon-memory-kib",
            "32768",
            "--unbounded",
        ]);
        assert_eq!(
            cli.resolved_command(),
            Commands::Run {
                format: OutputFormat::Json,
            }
        );
        let request = cli.costs.to_request();
        assert_eq!(request.bcrypt_cost, 10);
        assert_eq!(request.argon.memory_kib, 32768);
        assert_eq!(cli.bounds(), ParameterBounds::permissive());
    }

    #[test]
    fn test_sweep_arguments() {
        let cli = parse(&[
            "hashbench",
            "sweep",
            "--param",
            "argon-memory",
            "--from",
            "64",
            "--to",
            "256",
        ]);
        assert_eq!(
            cli.resolved_command(),
            Commands::Sweep {
                param: SweepParameter::ArgonMemory,
                from: 64,
                to: 256,
                step: 1,
            }
        );

        let unknown = "hashbench sweep --param scrypt --from 1 --to 2".split(' ');
        assert!(Cli::try_parse_from(unknown).is_err());
    }

    #[test]
    fn test_environment_fallbacks() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };
        let expected = [
            ("secret", "HASHBENCH_SECRET"),
            ("bcrypt_cost", "HASHBENCH_BCRYPT_COST"),
            ("argon_time_cost", "HASHBENCH_ARGON_TIME_COST"),
            ("argon_memory_kib", "HASHBENCH_ARGON_MEMORY_KIB"),
            ("argon_parallelism", "HASHBENCH_ARGON_PARALLELISM"),
        ];
        for (id, env) in expected {
            assert_eq!(env_of(id).as_deref(), Some(env), "{}", id);
        }
    }

    #[test]
    fn test_out_of_bounds_rejected_before_hashing() {
        let cli = parse(&["hashbench", "--bcrypt-cost", "20"]);
        let err = execute(&cli).unwrap_err();
        assert!(matches!(
            err,
            Error::Parameter(ParameterError::OutOfRange {
                parameter: "bcrypt cost",
                value: 20,
                ..
            })
        ));
        assert_eq!(exit_code(&err), EXIT_INVALID_INPUT);

        // 宽松范围允许 cost 20，只检查范围，不实际执行
        let cli = parse(&["hashbench", "--bcrypt-cost", "20", "--unbounded"]);
        let request = cli.costs.to_request();
        assert!(request.check_bounds(&cli.bounds()).is_ok());
    }

    #[test]
    fn test_sweep_checks_every_value() {
        let cli = parse(&[
            "hashbench",
            "sweep",
            "--param",
            "bcrypt-cost",
            "--from",
            "14",
            "--to",
            "16",
        ]);
        let err = execute(&cli).unwrap_err();
        assert!(err.is_parameter_error());
        assert_eq!(exit_code(&err), EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_sweep_values() {
        assert_eq!(sweep_values(4, 12, 4).unwrap(), vec![4, 8, 12]);
        assert_eq!(sweep_values(4, 10, 4).unwrap(), vec![4, 8]);
        assert_eq!(sweep_values(7, 7, 1).unwrap(), vec![7]);

        let err = sweep_values(4, 12, 0).unwrap_err();
        assert_eq!(config_key(&err), Some("step"));
        assert_eq!(exit_code(&err), EXIT_INVALID_INPUT);

        let err = sweep_values(12, 4, 1).unwrap_err();
        assert_eq!(config_key(&err), Some("from"));
        assert_eq!(exit_code(&err), EXIT_INVALID_INPUT);
    }

    #[test]
    fn test_sweep_point_limit() {
        assert_eq!(sweep_values(1, 64, 1).unwrap().len(), 64);
        let wide = sweep_values(0, u32::MAX, u32::MAX / 32).unwrap();
        assert_eq!(wide.len(), 33);

        let err = sweep_values(1, 65, 1).unwrap_err();
        assert_eq!(config_key(&err), Some("to"));

        let err = sweep_values(1, u32::MAX, 1).unwrap_err();
        assert_eq!(config_key(&err), Some("to"));
    }

    #[test]
    fn test_exit_codes() {
        let rejected = Error::out_of_range("bcrypt cost", 3, 4, 31);
        assert_eq!(exit_code(&rejected), EXIT_INVALID_INPUT);
        assert_eq!(exit_code(&Error::internal("serialize")), EXIT_FAILURE);
    }

    #[test]
    fn test_run_json_output() {
        let cli = parse(&[
            "hashbench",
            "run",
            "--format",
            "json",
            "--bcrypt-cost",
            "4",
            "--argon-time-cost",
            "1",
            "--argon-memory-kib",
            "8192",
            "--argon-parallelism",
            "1",
        ]);
        let output = execute(&cli).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["results"][0]["algorithm"], "bcrypt");
        assert_eq!(json["results"][1]["algorithm"], "argon2id");
        assert_eq!(json["results"][1]["status"], "completed");
    }

    #[test]
    fn test_run_table_output() {
        let cli = parse(&[
            "hashbench",
            "--bcrypt-cost",
            "4",
            "--argon-time-cost",
            "1",
            "--argon-memory-kib",
            "8192",
            "--argon-parallelism",
            "1",
        ]);
        let output = execute(&cli).unwrap();
        assert!(output.starts_with("Hash timing (seconds)"));
        assert!(output.contains("bcrypt"));
        assert!(output.contains("argon2id"));
    }
}
