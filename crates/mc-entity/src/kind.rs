//! Vanilla entity types.

use std::fmt;
use std::str::FromStr;

use crate::UnknownName;

const NAMESPACE: &str = "minecraft:";

macro_rules! entity_types {
    ($($variant:ident => $name:literal,)*) => {
        /// The vanilla type of an entity, as used by the `type=` selector argument.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EntityType {
            $($variant,)*
        }

        impl EntityType {
            /// Every known type, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The path of the namespaced id, e.g. `zombie` for `minecraft:zombie`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

entity_types! {
    AreaEffectCloud => "area_effect_cloud",
    ArmorStand => "armor_stand",
    Arrow => "arrow",
    Bat => "bat",
    Blaze => "blaze",
    Boat => "boat",
    Cat => "cat",
    Chicken => "chicken",
    Cow => "cow",
    Creeper => "creeper",
    Enderman => "enderman",
    ExperienceOrb => "experience_orb",
    FallingBlock => "falling_block",
    Ghast => "ghast",
    Horse => "horse",
    IronGolem => "iron_golem",
    Item => "item",
    ItemFrame => "item_frame",
    Minecart => "minecart",
    Pig => "pig",
    Player => "player",
    Sheep => "sheep",
    Skeleton => "skeleton",
    Slime => "slime",
    Spider => "spider",
    Tnt => "tnt",
    Villager => "villager",
    Witch => "witch",
    Wolf => "wolf",
    Zombie => "zombie",
}

impl EntityType {
    /// Look up a type by namespaced id. The `minecraft:` namespace may be omitted.
    #[must_use]
    pub fn from_namespace_id(id: &str) -> Option<Self> {
        let path = id.strip_prefix(NAMESPACE).unwrap_or(id);
        Self::ALL.iter().copied().find(|kind| kind.name() == path)
    }
}

impl FromStr for EntityType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_namespace_id(s).ok_or_else(|| UnknownName {
            kind: "entity type",
            name: s.to_string(),
        })
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NAMESPACE}{}", self.name())
    }
}
