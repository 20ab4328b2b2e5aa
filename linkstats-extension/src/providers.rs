//! The account-link provider set.
//!
//! Per player: whether an account is linked, the account's tag and creation
//! date, and (for members of the primary group) nickname, join date and roles.
//! Per server: linked-account count, primary-group size and their ratio, plus
//! the notice shown while the service is down.

use crate::config::ExtensionConfig;
use crate::error::ExtensionResult;
use crate::registry::ProviderRegistry;
use linkstats_model::{ProviderDescriptor, Scope};

/// Provider names, as conditions and hosts refer to them.
pub mod names {
    pub const NOT_READY_NOTICE: &str = "notReadyNotice";
    pub const HAS_LINKED_ACCOUNT: &str = "hasLinkedAccount";
    pub const USERNAME: &str = "username";
    pub const ACCOUNT_CREATED: &str = "accountCreated";
    pub const HAS_MEMBER: &str = "hasMember";
    pub const NICKNAME: &str = "nickname";
    pub const JOIN_DATE: &str = "joinDate";
    pub const ROLES: &str = "roles";
    pub const ACCOUNTS_LINKED: &str = "accountsLinked";
    pub const GUILD_USERS: &str = "guildUsers";
    pub const ACCOUNTS_LINKED_PER_MEMBERS: &str = "accountsLinkedPerMembers";
}

/// Rendered for an empty collection or an unset nickname.
pub const PLACEHOLDER: &str = "-";
pub const NOT_LINKED: &str = "Not Linked";
pub const NOT_A_MEMBER: &str = "Not a Member";

/// `numerator / denominator`, or exactly 0.0 when either is zero.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if numerator == 0 || denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Joins role names with `", "`, or [`PLACEHOLDER`] when there are none.
pub fn join_roles(roles: &[String]) -> String {
    if roles.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        roles.join(", ")
    }
}

/// Builds the registry of account-link providers.
pub fn account_link_registry(config: &ExtensionConfig) -> ExtensionResult<ProviderRegistry> {
    use self::names::*;

    ProviderRegistry::builder()
        .notice(
            ProviderDescriptor::string(NOT_READY_NOTICE, Scope::Server)
                .text("Warning!")
                .description("The account link service is not ready"),
            config.notice_text.clone(),
        )
        // Player
        .boolean(
            ProviderDescriptor::boolean(HAS_LINKED_ACCOUNT, Scope::Player)
                .text("Has Linked Account")
                .description("Has the player linked their external account")
                .priority(101),
            |ctx| Ok(ctx.resolver().resolve_account(ctx.player()?)?.is_some()),
        )
        .string(
            ProviderDescriptor::string(USERNAME, Scope::Player)
                .text("Username")
                .description("The player's linked account username")
                .priority(100)
                .conditional_on(HAS_LINKED_ACCOUNT)
                .in_player_table(),
            |ctx| {
                let account = ctx.resolver().resolve_account(ctx.player()?)?;
                Ok(account.map_or_else(|| NOT_LINKED.to_string(), |a| format!("@{}", a.tag)))
            },
        )
        .integer(
            ProviderDescriptor::integer(ACCOUNT_CREATED, Scope::Player)
                .text("Account creation date")
                .description("When the player's linked account was created")
                .priority(99)
                .conditional_on(HAS_LINKED_ACCOUNT)
                .date(),
            |ctx| {
                let account = ctx.resolver().resolve_account(ctx.player()?)?;
                Ok(account.map_or(-1, |a| a.created_at_millis))
            },
        )
        .boolean(
            ProviderDescriptor::boolean(HAS_MEMBER, Scope::Player)
                .conditional_on(HAS_LINKED_ACCOUNT)
                .hidden(),
            |ctx| Ok(ctx.resolver().resolve_membership(ctx.player()?)?.is_some()),
        )
        .string(
            ProviderDescriptor::string(NICKNAME, Scope::Player)
                .text("Nickname")
                .description("The linked account's nickname on the primary group")
                .priority(98)
                .conditional_on(HAS_MEMBER),
            |ctx| {
                let member = ctx.resolver().resolve_membership(ctx.player()?)?;
                Ok(match member {
                    Some(m) => m.nickname.unwrap_or_else(|| PLACEHOLDER.to_string()),
                    None => NOT_A_MEMBER.to_string(),
                })
            },
        )
        .integer(
            ProviderDescriptor::integer(JOIN_DATE, Scope::Player)
                .text("Join Date")
                .description("When the linked account joined the primary group")
                .priority(97)
                .conditional_on(HAS_MEMBER)
                .date(),
            |ctx| {
                let member = ctx.resolver().resolve_membership(ctx.player()?)?;
                Ok(member.map_or(-1, |m| m.joined_at_millis))
            },
        )
        .string(
            ProviderDescriptor::string(ROLES, Scope::Player)
                .text("Roles")
                .description("The linked account's roles on the primary group")
                .priority(96)
                .conditional_on(HAS_MEMBER),
            |ctx| {
                let member = ctx.resolver().resolve_membership(ctx.player()?)?;
                Ok(member.map_or_else(|| PLACEHOLDER.to_string(), |m| join_roles(&m.role_names)))
            },
        )
        // Server
        .integer(
            ProviderDescriptor::integer(ACCOUNTS_LINKED, Scope::Server)
                .text("Accounts Linked")
                .description("How many players have linked an external account")
                .priority(100),
            |ctx| Ok(ctx.resolver().linked_account_count()? as i64),
        )
        .integer(
            ProviderDescriptor::integer(GUILD_USERS, Scope::Server)
                .text("Users in main guild")
                .description("How many accounts are members of the primary group")
                .priority(99),
            |ctx| Ok(ctx.resolver().group_member_count()?.unwrap_or(0) as i64),
        )
        .percentage(
            ProviderDescriptor::percentage(ACCOUNTS_LINKED_PER_MEMBERS, Scope::Server)
                .text("Accounts linked / Users in main guild")
                .description(
                    "Linked accounts relative to primary group size. \
                     Linked accounts need not be group members.",
                )
                .priority(97),
            |ctx| {
                let resolver = ctx.resolver();
                let linked = resolver.linked_account_count()?;
                let members = resolver.group_member_count()?.unwrap_or(0);
                Ok(ratio(linked, members))
            },
        )
        .build()
}
