use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clanchat_store::application::{
    AppStore, FetchCaches, FetchChannelsByUserUseCase, FetchChannelsRequest,
    FetchClanMembersUseCase, FriendsUseCase, Selectors, ToastQueue, UseCaseDeps,
};
use clanchat_store::domain::entities::{ClanId, UserProfile};
use clanchat_store::domain::ports::{FriendTargets, NotificationPort};
use clanchat_store::infrastructure::config::TargetArgs;
use clanchat_store::infrastructure::{
    AppConfig, CliArgs, Command, DesktopNotificationService, FanoutNotifier, HttpChatClient,
    StaticSessionProvider, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("failed to load configuration")?;
    config.merge_with_args(args);
    Ok(config)
}

/// Everything a command needs, wired once from configuration.
struct Runtime {
    store: AppStore,
    selectors: Selectors,
    toasts: Arc<ToastQueue>,
    channels: FetchChannelsByUserUseCase,
    members: FetchClanMembersUseCase,
    friends: FriendsUseCase,
}

impl Runtime {
    fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpChatClient::new(config.api.base_url.clone(), config.api.timeout())?;
        let sessions = StaticSessionProvider::from_config(&config.session);
        let store = AppStore::new();

        if sessions.is_configured() {
            store.update_account(|account| {
                account.set_account(UserProfile::new(
                    config.session.user_id.trim(),
                    config.session.username.trim(),
                ));
            });
        }

        let deps = UseCaseDeps {
            sessions: Arc::new(sessions),
            client: Arc::new(client),
            caches: Arc::new(FetchCaches::new(config.cache.ttls())),
            store: store.clone(),
        };

        let toasts = Arc::new(ToastQueue::new(config.toast_duration()));
        let mut notifier = FanoutNotifier::new();
        if config.notifications.enabled {
            notifier = notifier.with(toasts.clone());
        }
        if config.notifications.desktop {
            notifier = notifier.with(Arc::new(DesktopNotificationService::new(true)));
        }
        let notifier: Arc<dyn NotificationPort> = Arc::new(notifier);

        Ok(Self {
            selectors: Selectors::new(store.clone()),
            store,
            toasts,
            channels: FetchChannelsByUserUseCase::new(deps.clone()),
            members: FetchClanMembersUseCase::new(deps.clone()),
            friends: FriendsUseCase::new(deps, notifier),
        })
    }

    async fn run(&self, command: Command, json: bool) -> Result<()> {
        match command {
            Command::Channels {
                clear,
                no_cache,
                voice,
            } => {
                let request = FetchChannelsRequest {
                    no_cache,
                    is_clear_channel: clear,
                };
                self.channels.execute(request).await?;
                if voice {
                    let channels = self.selectors.gmeet_voice_channels();
                    let rows: Vec<_> = channels.iter().map(|c| c.as_ref()).collect();
                    print_output(json, &rows, |c| {
                        format!(
                            "{}\t{}\t{}",
                            c.id,
                            c.channel_label,
                            c.meeting_code.as_deref().unwrap_or("-")
                        )
                    })
                } else {
                    let channels = self.selectors.all_info_channels();
                    print_output(json, channels.as_slice(), |c| {
                        format!(
                            "{}\t{}\t{}\t{:?}",
                            c.id,
                            c.channel_label,
                            c.clan_name.as_deref().unwrap_or("-"),
                            c.channel_type
                        )
                    })
                }
            }
            Command::Members { clan_id, no_cache } => {
                self.members.execute(&ClanId::from(clan_id), no_cache).await?;
                let partition = self.selectors.clan_member_with_status_ids();
                if json {
                    print_json(partition.as_ref())
                } else {
                    let members = self.store.clan_members();
                    for (label, ids) in [("online", &partition.online), ("offline", &partition.offline)] {
                        println!("{label} ({})", ids.len());
                        for id in ids {
                            let name = members
                                .get(id)
                                .map_or_else(|| "?".to_string(), |m| m.best_name().to_string());
                            println!("  {id}\t{name}");
                        }
                    }
                    Ok(())
                }
            }
            Command::Friends { blocked, no_cache } => {
                self.friends.fetch_list_friends(no_cache).await?;
                let friends = if blocked {
                    (*self.selectors.blocked_users()).clone()
                } else {
                    self.store.friends().friends.all()
                };
                let rows: Vec<_> = friends.iter().map(|f| f.as_ref()).collect();
                print_output(json, &rows, |f| {
                    format!("{}\t{}\t{:?}", f.user.id, f.user.username, f.state)
                })
            }
            Command::AddFriend(targets) => {
                self.friends.add_friends(&to_targets(targets)).await?;
                println!("Friend request sent");
                Ok(())
            }
            Command::RemoveFriend(targets) => {
                self.friends.delete_friends(&to_targets(targets)).await?;
                println!("Removed");
                Ok(())
            }
            Command::Block(targets) => {
                self.friends.block_friends(&to_targets(targets)).await?;
                println!("Blocked");
                Ok(())
            }
        }
    }

    /// Prints queued toasts to stderr.
    fn flush_toasts(&self) {
        for toast in self.toasts.drain() {
            eprintln!("[{}] {}: {}", toast.level, toast.title, toast.message);
        }
    }
}

fn to_targets(args: TargetArgs) -> FriendTargets {
    FriendTargets {
        ids: args.ids.into_iter().map(Into::into).collect(),
        usernames: args.usernames,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_output<T: Serialize>(json: bool, rows: &[T], line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        return print_json(rows);
    }
    for row in rows {
        println!("{}", line(row));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = clanchat_store::VERSION, "Starting clanchat");
    debug!(?config, "Effective configuration");

    let runtime = Runtime::new(&config)?;
    let result = runtime.run(args.command, args.json).await;
    runtime.flush_toasts();

    result
}
