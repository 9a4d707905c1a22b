use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use kisan_ai::app::KisanApp;
use kisan_ai::config::Config;
use kisan_ai::domains::crops::SoilType;
use kisan_ai::domains::diagnosis::ImageUpload;
use kisan_ai::domains::profile::Region;
use kisan_ai::domains::tips::{self, TipCategory};
use kisan_ai::error::{KisanAiError, Result};
use kisan_ai::flows::Submission;
use kisan_ai::services::auth::{LoginMethod, SignupForm};

#[derive(Parser, Debug)]
#[command(name = "kisan-ai")]
#[command(about = "KisanAI farming assistant")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("KISAN_AI_GIT_SHA"), ")"))]
struct Cli {
    #[arg(long, env = "KISAN_AI_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the local storage directory from the config.
    #[arg(long, env = "KISAN_AI_STORAGE")]
    storage: Option<PathBuf>,

    /// Skip simulated latency.
    #[arg(long, default_value_t = false)]
    instant: bool,

    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email/password or phone/OTP.
    Login {
        #[arg(long, default_value = "ravi.singh@example.com")]
        email: String,
        #[arg(long, default_value = "password")]
        password: String,
        #[arg(long, requires = "otp")]
        phone: Option<String>,
        #[arg(long, requires = "phone")]
        otp: Option<String>,
    },
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        region: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the stored profile, optionally editing fields (`--set phone=...`).
    Profile {
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    Dashboard,
    /// Ask the farming assistant a question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Analyse a crop photo for disease.
    Detect { image: PathBuf },
    Recommend {
        #[arg(long)]
        soil: String,
        #[arg(long)]
        rainfall: Option<u32>,
        #[arg(long)]
        temperature: Option<u32>,
        #[arg(long)]
        humidity: Option<u32>,
    },
    Tips {
        #[arg(default_value = "latest")]
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    kisan_ai::logging::init_tracing("kisan_ai_cli");
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(storage) = &cli.storage {
        config.storage_dir = Some(storage.to_string_lossy().to_string());
    }
    if cli.instant {
        config.latency = kisan_ai::config::LatencyConfig::zero();
    }
    let app = KisanApp::from_config(&config)?;

    match cli.command {
        Command::Login {
            email,
            password,
            phone,
            otp,
        } => {
            let method = login_method(email, password, phone, otp)?;
            eprintln!("Logging in...");
            let outcome = app.auth().login(method).await?;
            report(outcome, "Logged in.");
            print_output(cli.json, &app.auth().current_profile()?, |profile| {
                format!("Welcome, {}", profile.display_name())
            })?;
        }
        Command::Signup {
            first_name,
            last_name,
            phone,
            email,
            region,
            password,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                phone,
                email,
                region: Some(parse_region(&region)?),
                password,
            };
            eprintln!("Creating account...");
            let outcome = app.auth().signup(form).await?;
            report(outcome, "Account created.");
        }
        Command::Logout => {
            app.auth().logout()?;
            eprintln!("Logged out.");
        }
        Command::Profile { set } => {
            let mut editor = app.profile_editor()?;
            if !set.is_empty() {
                editor.begin_edit();
                if let Some(draft) = editor.draft_mut() {
                    for assignment in &set {
                        let (field, value) = assignment.split_once('=').ok_or_else(|| {
                            KisanAiError::Config(format!("expected FIELD=VALUE, got `{assignment}`"))
                        })?;
                        if !draft.set_field(field.trim(), value.trim()) {
                            return Err(KisanAiError::Config(format!("unknown field `{field}`")));
                        }
                    }
                }
                editor.save()?;
            }
            print_output(cli.json, editor.profile(), |profile| {
                format!(
                    "[{}] {}\nEmail:   {}\nPhone:   {}\nRegion:  {}\nAddress: {}",
                    profile.initials(),
                    profile.display_name(),
                    profile.email,
                    profile.phone,
                    profile.region,
                    profile.address
                )
            })?;
        }
        Command::Dashboard => {
            let summary = app.dashboard().summary()?;
            print_output(cli.json, &summary, |summary| {
                let mut out = format!(
                    "Welcome, {}\n\nWeather ({}): {}°C, {}",
                    summary.profile.first_name,
                    summary.weather.location,
                    summary.weather.temp_c,
                    summary.weather.condition.label()
                );
                for day in &summary.forecast {
                    out.push_str(&format!("\n  {}: {}°C", day.label, day.temp_c));
                }
                out.push_str("\n\nRecent Notifications");
                for note in &summary.notifications {
                    out.push_str(&format!("\n- {} ({})\n  {}", note.title, note.date, note.description));
                }
                out
            })?;
        }
        Command::Ask { question } => {
            let chat = app.chat();
            let outcome = chat.submit(&question.join(" ")).await?;
            if let Submission::Ignored(reason) = outcome {
                eprintln!("Nothing to send ({reason:?}).");
                return Ok(());
            }
            let messages = chat.messages();
            print_output(cli.json, &messages, |messages| {
                messages
                    .iter()
                    .skip(1)
                    .map(|message| {
                        format!("[{}] {:?}: {}", message.display_time(), message.role, message.content)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Detect { image } => {
            let detection = app.detection();
            let upload = ImageUpload::from_path(&image).await?;
            if let Submission::Ignored(reason) = detection.select_image(upload) {
                eprintln!("No image selected ({reason:?}).");
                return Ok(());
            }
            eprintln!("Analyzing...");
            detection.analyze().await?;
            if let Some(result) = detection.result() {
                print_output(cli.json, &result, |result| {
                    let mut out = format!(
                        "{} ({:.1}% confidence, {:?} severity)\n{}\n\nTreatment:",
                        result.disease, result.confidence, result.severity, result.description
                    );
                    for step in &result.treatment {
                        out.push_str(&format!("\n- {step}"));
                    }
                    out
                })?;
            }
        }
        Command::Recommend {
            soil,
            rainfall,
            temperature,
            humidity,
        } => {
            let crops = app.crops();
            let soil_type = SoilType::parse(&soil)
                .ok_or_else(|| KisanAiError::Config(format!("unknown soil type `{soil}`")))?;
            crops.set_soil_type(soil_type);
            crops.update(|conditions| {
                if let Some(value) = rainfall {
                    conditions.set_rainfall(value);
                }
                if let Some(value) = temperature {
                    conditions.set_temperature(value);
                }
                if let Some(value) = humidity {
                    conditions.set_humidity(value);
                }
            });
            eprintln!("Generating...");
            crops.submit().await?;
            print_output(cli.json, &crops.recommendations(), |crops| {
                crops
                    .iter()
                    .map(|crop| {
                        format!(
                            "{} - {}% match\n  {}\n  Growth: {} | Water: {:?} | Yield: {}",
                            crop.name,
                            crop.score,
                            crop.description,
                            crop.growth_period,
                            crop.water_requirement,
                            crop.expected_yield
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Tips { category } => {
            let category = TipCategory::parse(&category)
                .ok_or_else(|| KisanAiError::Config(format!("unknown tip category `{category}`")))?;
            print_output(cli.json, &tips::tips_for(category), |tips| {
                let mut out = category.label().to_string();
                for tip in tips {
                    out.push_str(&format!(
                        "\n\n{} [{}]\n{} · {}\n{}",
                        tip.title, tip.category, tip.date, tip.read_time, tip.content
                    ));
                }
                out
            })?;
        }
    }

    Ok(())
}

fn report(outcome: Submission, accepted: &str) {
    match outcome {
        Submission::Accepted => eprintln!("{accepted}"),
        Submission::Ignored(reason) => eprintln!("Ignored: {reason:?}"),
    }
}

fn login_method(
    email: String,
    password: String,
    phone: Option<String>,
    otp: Option<String>,
) -> Result<LoginMethod> {
    match (phone, otp) {
        (Some(phone), Some(otp)) => Ok(LoginMethod::Phone { phone, otp }),
        (None, None) => Ok(LoginMethod::Email { email, password }),
        _ => Err(KisanAiError::Config(
            "--phone and --otp must be given together".to_string(),
        )),
    }
}

fn parse_region(value: &str) -> Result<Region> {
    Region::parse(value)
        .ok_or_else(|| KisanAiError::Config(format!("unknown region `{value}`")))
}

/// Stdout carries only the result; progress and status go to stderr.
fn print_output<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    println!("{}", render_output(json, value, render)?);
    Ok(())
}

fn render_output<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    render: impl FnOnce(&T) -> String,
) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(render(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kisan_ai::domains::profile::UserProfile;

    #[test]
    fn otp_without_phone_is_rejected() {
        let parsed = Cli::try_parse_from(["kisan-ai", "login", "--otp", "1234"]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["kisan-ai", "login", "--phone", "+91 9876543210"]);
        assert!(parsed.is_err());
        assert!(login_method("a@b.c".into(), "pw".into(), None, Some("1234".into())).is_err());
    }

    #[test]
    fn phone_pair_selects_phone_login() {
        let method = login_method(
            "a@b.c".into(),
            "pw".into(),
            Some("+91 9876543210".into()),
            Some("1234".into()),
        )
        .unwrap();
        assert!(matches!(method, LoginMethod::Phone { .. }));
    }

    #[test]
    fn unknown_region_names_the_value() {
        assert_eq!(parse_region("punjab").unwrap(), Region::Punjab);
        let err = parse_region("atlantis").unwrap_err();
        assert!(matches!(&err, KisanAiError::Config(msg) if msg.contains("atlantis")));
    }

    #[test]
    fn json_output_is_only_json() {
        let rendered =
            render_output(true, &UserProfile::demo(), |profile| profile.display_name()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["firstName"], "Ravi");

        let plain = render_output(false, &UserProfile::demo(), |profile| profile.display_name())
            .unwrap();
        assert_eq!(plain, "Ravi Singh");
    }
}
