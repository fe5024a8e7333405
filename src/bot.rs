//! Discord side of the bot.
//!
//! Connects to the gateway with the `GUILDS` and `GUILD_PRESENCES` intents so
//! serenity's cache keeps member presences, registers the two application
//! commands once ready, and answers every command interaction with the
//! ephemeral reply produced by [`commands::dispatch`].

use std::sync::Arc;

use serenity::{
    Client,
    all::{
        ActivityData, ActivityType, CommandInteraction, CommandOptionType, CommandType, Context,
        CreateActionRow, CreateAllowedMentions, CreateButton, CreateCommand, CreateCommandOption,
        CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler, GatewayIntents,
        GuildId, Interaction, Ready, UserId,
    },
    async_trait,
    cache::Cache,
};

use crate::{
    Res,
    commands::{self, ACTIVITY_COMMAND, Command, LOOKUP_COMMAND, LOOKUP_URL_OPTION, PresenceSource, Reply},
    config, info,
    management::CredentialManager,
    server, success,
    types::{Activity, ActivityKind, Presence},
    warning,
};

pub struct Handler {
    credentials: Arc<CredentialManager>,
}

impl Handler {
    pub fn new(credentials: Arc<CredentialManager>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        match serenity::all::Command::set_global_commands(&ctx.http, command_definitions()).await {
            Ok(registered) => info!("Registered {} application commands.", registered.len()),
            Err(e) => warning!("Failed to register application commands: {}", e),
        }
        success!("ISRC lookup bot is now running as {}.", ready.user.name);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(interaction) = interaction else {
            return;
        };
        let Some(command) = parse_command(&interaction) else {
            warning!("Ignoring unknown command {}", interaction.data.name);
            return;
        };

        let reply = commands::dispatch(command, self.credentials.as_ref(), ctx.cache.as_ref()).await;
        let response = CreateInteractionResponse::Message(reply_message(reply));
        if let Err(e) = interaction.create_response(&ctx.http, response).await {
            warning!("Failed to respond to {}: {}", interaction.data.name, e);
        }
    }
}

/// `/lookup url` and the `Lookup ISRC from activities` user command.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(LOOKUP_COMMAND)
            .description("Performs a lookup for the track ISRC")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    LOOKUP_URL_OPTION,
                    "spotify url for the track.",
                )
                .required(true),
            ),
        CreateCommand::new(ACTIVITY_COMMAND).kind(CommandType::User),
    ]
}

/// Maps an interaction to its [`Command`], `None` for anything not registered here.
pub fn parse_command(interaction: &CommandInteraction) -> Option<Command> {
    let data = &interaction.data;
    match (data.kind, data.name.as_str()) {
        (CommandType::ChatInput, LOOKUP_COMMAND) => {
            let url = data
                .options
                .iter()
                .find(|option| option.name == LOOKUP_URL_OPTION)
                .and_then(|option| option.value.as_str())
                .unwrap_or_default();
            Some(Command::Lookup {
                url: url.to_string(),
            })
        }
        (CommandType::User, ACTIVITY_COMMAND) => Some(Command::ActivityLookup {
            guild_id: interaction.guild_id,
            target: data.target_id?.to_user_id(),
        }),
        _ => None,
    }
}

pub fn reply_message(reply: Reply) -> CreateInteractionResponseMessage {
    let message = CreateInteractionResponseMessage::new()
        .content(reply.content)
        .ephemeral(true)
        .allowed_mentions(CreateAllowedMentions::new());

    match reply.button {
        Some(button) => message.components(vec![CreateActionRow::Buttons(vec![
            CreateButton::new_link(button.url).label(button.label),
        ])]),
        None => message,
    }
}

impl PresenceSource for Cache {
    fn presence(&self, guild_id: GuildId, user_id: UserId) -> Option<Presence> {
        let guild = self.guild(guild_id)?;
        guild.presences.get(&user_id).map(Presence::from)
    }
}

impl From<&serenity::all::Presence> for Presence {
    fn from(presence: &serenity::all::Presence) -> Self {
        Presence {
            activities: presence.activities.iter().map(Activity::from).collect(),
        }
    }
}

impl From<&serenity::all::Activity> for Activity {
    fn from(activity: &serenity::all::Activity) -> Self {
        let kind = match activity.kind {
            ActivityType::Playing => ActivityKind::Playing,
            ActivityType::Streaming => ActivityKind::Streaming,
            ActivityType::Listening => ActivityKind::Listening,
            ActivityType::Watching => ActivityKind::Watching,
            ActivityType::Custom => ActivityKind::Custom,
            ActivityType::Competing => ActivityKind::Competing,
            _ => ActivityKind::Unknown,
        };
        Activity {
            name: activity.name.clone(),
            kind,
            sync_id: activity.sync_id.clone(),
        }
    }
}

/// Starts the bot and blocks until the gateway connection ends.
///
/// Order matters: the first Spotify token exchange runs before the gateway
/// connects, so a bot with bad Spotify credentials never comes online.
///
/// # Errors
///
/// Missing configuration, a failed first token exchange, or a gateway error.
pub async fn run() -> Res<()> {
    let token = config::discord_token()?;

    let credentials = Arc::new(CredentialManager::from_env().await?);
    success!("Spotify client initialized.");
    let renewal = credentials.spawn_renewal();

    if let Some(addr) = config::server_addr() {
        let server_credentials = Arc::clone(&credentials);
        tokio::spawn(async move {
            info!("Health endpoint listening on {}", addr);
            if let Err(e) = server::start_api_server(&addr, server_credentials).await {
                warning!("Health server stopped: {}", e);
            }
        });
    }

    info!("Starting the bot...");
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_PRESENCES;
    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(Arc::clone(&credentials)))
        .activity(ActivityData::listening("Spotify"))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            shard_manager.shutdown_all().await;
        }
    });

    let result = client.start().await;
    renewal.abort();
    result?;
    Ok(())
}
