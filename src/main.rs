use cert_verify_common::{dashboard, Screen};
use cert_verify_rust::{cli, config, error, export, workflow};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Login { role } => {
            println!("🛡️ cert-verify - ログイン\n");

            let screen = match role {
                Some(role) => {
                    println!("ロール: {}", role);
                    role.entry_screen()
                }
                None => {
                    // ロール未選択の既定ログイン
                    Screen::default_entry()
                }
            };
            println!("入口画面: {}\n", screen);

            if screen == Screen::Dashboard {
                print_dashboard(&config);
            }
        }

        Commands::Run { folder, output, delay_ms, no_qr } => {
            println!("🛡️ cert-verify - 証明書検証\n");

            let output_dir = output.unwrap_or_else(|| folder.clone());
            let delay = Duration::from_millis(delay_ms.unwrap_or(config.confirm_delay_ms));

            workflow::run_interactive(&folder, &output_dir, delay, no_qr, &config, cli.verbose)
                .await?;

            println!("\n✅ 完了");
        }

        Commands::Verify { input, decision, output, delay_ms } => {
            println!("🛡️ cert-verify - 判定適用\n");

            let output_dir = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
            });
            let delay = Duration::from_millis(delay_ms.unwrap_or(config.confirm_delay_ms));

            workflow::run_verify(&input, decision, &output_dir, delay).await?;

            println!("\n✅ 完了");
        }

        Commands::Qr { id, output, size } => {
            println!("🔳 cert-verify - QRコード生成\n");

            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let size = size.unwrap_or(config.qr_size);

            let path = export::export_qr(&id, &output_dir, size)?;
            println!("✔ QR出力: {}", path.display());
        }

        Commands::Config { set_institution, set_delay_ms, show } => {
            let mut config = config;

            if let Some(name) = set_institution {
                config.set_institution(name)?;
                println!("✔ 機関名を設定しました");
            }

            if let Some(delay) = set_delay_ms {
                config.set_confirm_delay_ms(delay)?;
                println!("✔ 模擬遅延を設定しました");
            }

            if show {
                println!("設定:");
                println!("  機関名: {}", config.institution);
                println!("  模擬遅延: {}ms", config.confirm_delay_ms);
                println!("  QRサイズ: {}px", config.qr_size);
            }
        }
    }

    Ok(())
}

fn print_dashboard(config: &Config) {
    let summary = dashboard::DashboardSummary::sample(config.institution.as_str());
    println!("Welcome, {}", summary.institution);
    println!("  証明書総数:   {}", summary.total_certificates);
    println!("  検証済み:     {}", summary.verified);
    println!("  検証待ち:     {}", summary.pending);
    println!("  要確認:       {}", summary.flagged);

    println!("\n直近のアクティビティ:");
    for row in dashboard::sample_activity() {
        println!("  {:<16} {:<12} {}", row.file_name, row.upload_date, row.status);
    }
}
