use clap::Parser;
use ehall_catalog::{
    Config, ConsoleSolver, CourseRecord, Credentials, Ehall, HttpEhallApi, Result,
    config::DEFAULT_CONFIG_FILE, logging::setup_logging,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Log into ehall and print the full course catalog
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// 学生号
    username: String,
    /// 密码
    password: String,
    /// TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Catalog cache file, overriding `cache_path`
    #[arg(long)]
    cache: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config {}: {e}", args.config.display());
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config);

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: Config) -> Result<()> {
    let credentials = Credentials::new(args.username, args.password)?;
    let cache_path = args.cache.unwrap_or_else(|| config.cache_path.clone());

    let ehall = Ehall::new(HttpEhallApi::new()?, ConsoleSolver, credentials, config)?;
    let courses = ehall.get_catalog(&cache_path).await?;
    print_courses(&courses);
    Ok(())
}

fn print_courses(courses: &[CourseRecord]) {
    println!("==================全校课程==================");
    for course in courses {
        println!(
            "课程号: {:<12}课程: {:<24}学分: {:<6}学时: {:<6}开课学院: {}",
            course.code, course.name, course.credit, course.hours, course.college
        );
    }
    println!("============================================");
    println!("共 {} 门课程", courses.len());
}
