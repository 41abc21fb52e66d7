//! Entity command arguments.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashMap;
use mc_coord::Point;
use mc_entity::{Entity, EntityCast, EntityType, GameMode, PLAYER, Target};
use mc_selector::{Builder, EntitySelector, Gather, Sort, properties};
use tracing::trace;
use uuid::Uuid;

use crate::parser::{Parser, ScanError};
use crate::{ErrorCode, IntRange, SyntaxError};

/// Argument names accepted inside brackets.
pub const ARGUMENT_NAMES: [&str; 21] = [
    "x",
    "y",
    "z",
    "distance",
    "dx",
    "dy",
    "dz",
    "scores",
    "tag",
    "team",
    "limit",
    "sort",
    "level",
    "gamemode",
    "name",
    "x_rotation",
    "y_rotation",
    "type",
    "nbt",
    "advancements",
    "predicate",
];

const MAX_USERNAME_LEN: usize = 16;
const HYPHENATED_UUID_LEN: usize = 36;

bitflags::bitflags! {
    /// Constraints on what an argument may select.
    ///
    /// The bits match the entity parser properties byte of the command tree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ArgumentFlags: u8 {
        const SINGLE_ENTITY = 0x01;
        const ONLY_PLAYERS = 0x02;
    }
}

/// The `@x` prefix of a target selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorVariable {
    /// `@p`
    NearestPlayer,
    /// `@r`
    RandomPlayer,
    /// `@a`
    AllPlayers,
    /// `@e`
    AllEntities,
    /// `@s`
    Sender,
    /// `@n`
    NearestEntity,
}

impl SelectorVariable {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::NearestPlayer),
            'r' => Some(Self::RandomPlayer),
            'a' => Some(Self::AllPlayers),
            'e' => Some(Self::AllEntities),
            's' => Some(Self::Sender),
            'n' => Some(Self::NearestEntity),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::NearestPlayer => 'p',
            Self::RandomPlayer => 'r',
            Self::AllPlayers => 'a',
            Self::AllEntities => 'e',
            Self::Sender => 's',
            Self::NearestEntity => 'n',
        }
    }

    /// Selects at most one entity.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(
            self,
            Self::NearestPlayer | Self::RandomPlayer | Self::Sender | Self::NearestEntity
        )
    }

    /// Allowed on player-only arguments.
    #[must_use]
    pub const fn allows_players_only(self) -> bool {
        matches!(
            self,
            Self::NearestPlayer | Self::RandomPlayer | Self::AllPlayers | Self::Sender
        )
    }

    /// Only makes sense when the target can hold players.
    #[must_use]
    pub const fn requires_player_target(self) -> bool {
        matches!(self, Self::NearestPlayer | Self::RandomPlayer)
    }
}

impl fmt::Display for SelectorVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_char())
    }
}

/// A command argument that parses target selectors into [`EntitySelector`]s.
///
/// Accepted forms are a bare UUID, a bare username (player-only arguments),
/// or a selector variable with optional `[key=value,...]` arguments.
pub struct EntityArgument<T: ?Sized = dyn Entity> {
    id: String,
    target: Target<T>,
    flags: ArgumentFlags,
}

impl EntityArgument<dyn Entity> {
    /// Any entity.
    pub fn entity(id: impl Into<String>) -> Self {
        Self::new(id, Target::entity())
    }

    /// Any player.
    pub fn player(id: impl Into<String>) -> Self {
        Self::new(id, Target::player())
    }
}

impl<T: ?Sized + EntityCast> EntityArgument<T> {
    /// The argument is player-only exactly when `target` is a player class.
    pub fn new(id: impl Into<String>, target: Target<T>) -> Self {
        let mut flags = ArgumentFlags::empty();
        flags.set(
            ArgumentFlags::ONLY_PLAYERS,
            PLAYER.is_assignable_from(target.class()),
        );
        Self::with_flags(id, target, flags)
    }

    pub fn with_flags(id: impl Into<String>, target: Target<T>, flags: ArgumentFlags) -> Self {
        Self {
            id: id.into(),
            target,
            flags,
        }
    }

    /// A copy of this argument restricted to single-entity selectors.
    #[must_use]
    pub fn single(&self) -> Self {
        Self::with_flags(
            self.id.clone(),
            self.target,
            self.flags | ArgumentFlags::SINGLE_ENTITY,
        )
    }

    /// Parse `input` into a selector.
    ///
    /// `sender` is the entity issuing the command; it is required for `@s`.
    pub fn parse(
        &self,
        sender: Option<&dyn Entity>,
        input: &str,
    ) -> Result<EntitySelector<T>, SyntaxError> {
        if !input.contains('@') && !input.contains(char::is_whitespace) {
            if let Some(selector) = self.parse_literal(input) {
                return Ok(selector);
            }
        }

        let mut chars = input.chars();
        let (Some(prefix), Some(variable)) = (chars.next(), chars.next()) else {
            return Err(SyntaxError::new(
                ErrorCode::InvalidSyntax,
                "selector needs at least two characters",
                input,
            ));
        };
        if prefix != '@' {
            return Err(SyntaxError::new(
                ErrorCode::InvalidSyntax,
                "target selector needs to start with @",
                input,
            ));
        }
        let variable = SelectorVariable::from_char(variable).ok_or_else(|| {
            SyntaxError::new(ErrorCode::InvalidSyntax, "invalid selector variable", input)
        })?;

        self.check_variable(variable, input)?;

        let mut builder = Builder::new(self.target);
        match variable {
            SelectorVariable::NearestPlayer | SelectorVariable::NearestEntity => {
                builder.sort(Sort::Nearest).limit(1);
            }
            SelectorVariable::RandomPlayer => {
                builder.sort(Sort::Random).limit(1);
            }
            SelectorVariable::AllPlayers | SelectorVariable::AllEntities => {}
            SelectorVariable::Sender => {
                let sender = sender.ok_or_else(|| {
                    SyntaxError::new(
                        ErrorCode::InvalidSyntax,
                        "@s requires an entity sender",
                        input,
                    )
                })?;
                builder.gather(Gather::only(sender));
            }
        }

        let structure = chars.as_str();
        if !structure.is_empty() {
            self.parse_structure(&mut builder, input, structure)?;
        }

        Ok(builder.build())
    }

    fn parse_literal(&self, input: &str) -> Option<EntitySelector<T>> {
        if let Some(uuid) = hyphenated_uuid(input) {
            return Some(mc_selector::selector(self.target, |builder| {
                builder.gather(Gather::OnlyUuid(uuid));
            }));
        }

        if self.is_only_players() && is_username(input) {
            let name = input.to_string();
            return Some(mc_selector::selector(self.target, |builder| {
                builder.predicate_equals(properties::NAME, Some(name));
            }));
        }

        None
    }

    fn check_variable(&self, variable: SelectorVariable, input: &str) -> Result<(), SyntaxError> {
        if self.is_only_single_entity() && !variable.is_single() {
            return Err(SyntaxError::new(
                ErrorCode::OnlySingleEntity,
                "argument requires only a single entity",
                input,
            ));
        }

        if self.is_only_players() && !variable.allows_players_only() {
            return Err(SyntaxError::new(
                ErrorCode::OnlyPlayers,
                "argument requires only players",
                input,
            ));
        }

        if !self.is_only_players()
            && variable.requires_player_target()
            && !self.target.class().is_assignable_from(&PLAYER)
        {
            return Err(SyntaxError::new(
                ErrorCode::OnlyPlayers,
                "argument requires player types",
                input,
            ));
        }

        Ok(())
    }

    fn parse_structure(
        &self,
        builder: &mut Builder<T>,
        input: &str,
        structure: &str,
    ) -> Result<(), SyntaxError> {
        let body = structure
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| {
                SyntaxError::new(
                    ErrorCode::InvalidSyntax,
                    "target selector needs to start and end with brackets",
                    input,
                )
            })?;

        let mut types = AllowList::default();
        let mut game_modes = AllowList::default();

        for argument in Parser::new(body) {
            let (key, value) = argument.map_err(|err| scan_error(err, input))?;
            if !ARGUMENT_NAMES.contains(&key) {
                return Err(SyntaxError::new(
                    ErrorCode::InvalidArgumentName,
                    format!("argument name '{key}' does not exist"),
                    key,
                ));
            }
            self.apply_argument(builder, key, value, &mut types, &mut game_modes)?;
        }

        if !types.is_empty() {
            builder.predicate(properties::TYPE, move |_, kind| types.allows(&kind));
        }

        if self.is_only_players() && !game_modes.is_empty() {
            builder.predicate(properties::GAME_MODE, move |_, mode| {
                mode.is_some_and(|mode| game_modes.allows(&mode))
            });
        }

        Ok(())
    }

    fn apply_argument(
        &self,
        builder: &mut Builder<T>,
        key: &str,
        value: &str,
        types: &mut AllowList<EntityType>,
        game_modes: &mut AllowList<GameMode>,
    ) -> Result<(), SyntaxError> {
        match key {
            "type" => {
                let (allow, name) = negation(value);
                let kind = EntityType::from_namespace_id(name)
                    .ok_or_else(|| invalid_value("invalid entity name", value))?;
                types.insert(kind, allow);
            }
            "gamemode" => {
                let (allow, name) = negation(value);
                let mode = name
                    .parse::<GameMode>()
                    .map_err(|_| invalid_value("invalid entity game mode", value))?;
                game_modes.insert(mode, allow);
            }
            "limit" => {
                let limit = value
                    .parse::<i32>()
                    .map_err(|_| invalid_value("invalid limit number", value))?;
                let limit = usize::try_from(limit)
                    .ok()
                    .filter(|&limit| limit > 0)
                    .ok_or_else(|| invalid_value("limit must be positive", value))?;
                builder.limit(limit);
            }
            "sort" => {
                let sort = value
                    .parse::<Sort>()
                    .map_err(|_| invalid_value("invalid entity sort", value))?;
                builder.sort(sort);
            }
            "level" => {
                if !self.is_only_players() {
                    trace!(value, "level ignored on non-player argument");
                    return Ok(());
                }
                let range = value
                    .parse::<IntRange>()
                    .map_err(|_| invalid_value("invalid level number", value))?;
                builder.predicate(properties::LEVEL, move |_, level| {
                    level.is_some_and(|level| range.contains(level))
                });
            }
            "distance" => {
                let range = value
                    .parse::<IntRange>()
                    .map_err(|_| invalid_value("invalid distance number", value))?;
                builder.predicate(properties::POS, move |origin: Point, pos: Point| {
                    range.contains(origin.distance(pos) as i32)
                });
            }
            _ => trace!(key, value, "selector argument has no effect"),
        }

        Ok(())
    }

    /// The argument id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn target(&self) -> Target<T> {
        self.target
    }

    #[must_use]
    pub const fn flags(&self) -> ArgumentFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_only_single_entity(&self) -> bool {
        self.flags.contains(ArgumentFlags::SINGLE_ENTITY)
    }

    #[must_use]
    pub const fn is_only_players(&self) -> bool {
        self.flags.contains(ArgumentFlags::ONLY_PLAYERS)
    }
}

impl<T: ?Sized> Clone for EntityArgument<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            target: self.target,
            flags: self.flags,
        }
    }
}

impl<T: ?Sized> fmt::Debug for EntityArgument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityArgument")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("flags", &self.flags)
            .finish()
    }
}

impl<T: ?Sized> fmt::Display for EntityArgument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let single = self.flags.contains(ArgumentFlags::SINGLE_ENTITY);
        let players = self.flags.contains(ArgumentFlags::ONLY_PLAYERS);
        let kind = match (single, players) {
            (true, true) => "Player",
            (true, false) => "Entity",
            (false, true) => "Players",
            (false, false) => "Entities",
        };
        write!(f, "{kind}<{}>", self.id)
    }
}

/// Allow/deny entries for `type` and `gamemode`.
///
/// Listed keys use their stored bit. Unlisted keys pass only when at least
/// one entry is a deny.
struct AllowList<K> {
    entries: HashMap<K, bool>,
    has_deny: bool,
}

impl<K> Default for AllowList<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            has_deny: false,
        }
    }
}

impl<K: Eq + Hash> AllowList<K> {
    fn insert(&mut self, key: K, allow: bool) {
        self.has_deny |= !allow;
        self.entries.insert(key, allow);
    }

    fn allows(&self, key: &K) -> bool {
        self.entries.get(key).copied().unwrap_or(self.has_deny)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn negation(value: &str) -> (bool, &str) {
    match value.strip_prefix('!') {
        Some(rest) => (false, rest.trim_start()),
        None => (true, value),
    }
}

/// Only the canonical `8-4-4-4-12` form; `Uuid::try_parse` also takes the
/// simple, braced and urn forms.
fn hyphenated_uuid(input: &str) -> Option<Uuid> {
    if input.len() != HYPHENATED_UUID_LEN {
        return None;
    }
    Uuid::try_parse(input).ok()
}

fn is_username(input: &str) -> bool {
    (1..=MAX_USERNAME_LEN).contains(&input.len())
        && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid_value(message: &str, value: &str) -> SyntaxError {
    SyntaxError::new(ErrorCode::InvalidArgumentValue, message, value)
}

fn scan_error(err: ScanError<'_>, input: &str) -> SyntaxError {
    let message = match err {
        ScanError::MissingEquals(_) => "expected '=' after argument name",
        ScanError::Unclosed(_) => "unclosed argument value",
        ScanError::Unbalanced(_) => "unbalanced brackets in argument value",
    };
    SyntaxError::new(ErrorCode::InvalidSyntax, message, input)
}
