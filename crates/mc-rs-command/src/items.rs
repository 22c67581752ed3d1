//! Item catalog: item names and aliases to numeric item ids.
//!
//! Names are resolved exactly first, then approximately within a bucket of
//! names that share the token's first character. Buckets are kept in
//! lexicographic order so approximate matches are deterministic.

use std::collections::{BTreeMap, HashMap};

/// Numeric item/block id as understood by the server's `give` command.
pub type ItemId = u32;

/// Item id of the golden apple handed out by `!nom`.
pub const GOLDEN_APPLE: ItemId = 322;

/// Item names and aliases. The first name listed for an id is its display name.
const ITEMS: &[(&str, ItemId)] = &[
    // Blocks
    ("stone", 1),
    ("grass", 2),
    ("dirt", 3),
    ("cobblestone", 4),
    ("wood", 5),
    ("planks", 5),
    ("wooden planks", 5),
    ("sapling", 6),
    ("bedrock", 7),
    ("adminium", 7),
    ("water", 8),
    ("stationary water", 9),
    ("lava", 10),
    ("stationary lava", 11),
    ("sand", 12),
    ("gravel", 13),
    ("gold ore", 14),
    ("iron ore", 15),
    ("coal ore", 16),
    ("log", 17),
    ("tree trunk", 17),
    ("leaves", 18),
    ("sponge", 19),
    ("glass", 20),
    ("lapis lazuli ore", 21),
    ("lapis lazuli block", 22),
    ("dispenser", 23),
    ("sandstone", 24),
    ("note block", 25),
    ("bed block", 26),
    ("powered rail", 27),
    ("detector rail", 28),
    ("sticky piston", 29),
    ("cobweb", 30),
    ("web", 30),
    ("tall grass", 31),
    ("dead bush", 32),
    ("piston", 33),
    ("wool", 35),
    ("cloth", 35),
    ("dandelion", 37),
    ("yellow flower", 37),
    ("rose", 38),
    ("red flower", 38),
    ("brown mushroom", 39),
    ("red mushroom", 40),
    ("gold block", 41),
    ("iron block", 42),
    ("double slab", 43),
    ("slab", 44),
    ("step", 44),
    ("brick block", 45),
    ("bricks", 45),
    ("tnt", 46),
    ("bookshelf", 47),
    ("mossy cobblestone", 48),
    ("moss stone", 48),
    ("obsidian", 49),
    ("torch", 50),
    ("fire", 51),
    ("monster spawner", 52),
    ("mob spawner", 52),
    ("wooden stairs", 53),
    ("chest", 54),
    ("redstone wire", 55),
    ("diamond ore", 56),
    ("diamond block", 57),
    ("workbench", 58),
    ("crafting table", 58),
    ("crops", 59),
    ("farmland", 60),
    ("soil", 60),
    ("furnace", 61),
    ("burning furnace", 62),
    ("sign post", 63),
    ("wooden door block", 64),
    ("ladder", 65),
    ("rails", 66),
    ("minecart track", 66),
    ("cobblestone stairs", 67),
    ("wall sign", 68),
    ("lever", 69),
    ("stone pressure plate", 70),
    ("iron door block", 71),
    ("wooden pressure plate", 72),
    ("redstone ore", 73),
    ("glowing redstone ore", 74),
    ("redstone torch off", 75),
    ("redstone torch", 76),
    ("stone button", 77),
    ("button", 77),
    ("snow", 78),
    ("ice", 79),
    ("snow block", 80),
    ("cactus", 81),
    ("clay block", 82),
    ("sugar cane block", 83),
    ("jukebox", 84),
    ("fence", 85),
    ("pumpkin", 86),
    ("netherrack", 87),
    ("soul sand", 88),
    ("glowstone", 89),
    ("portal", 90),
    ("jack o lantern", 91),
    ("cake block", 92),
    ("redstone repeater off", 93),
    ("redstone repeater on", 94),
    ("locked chest", 95),
    ("trapdoor", 96),
    // Items
    ("iron shovel", 256),
    ("iron pickaxe", 257),
    ("iron axe", 258),
    ("flint and steel", 259),
    ("apple", 260),
    ("bow", 261),
    ("arrow", 262),
    ("coal", 263),
    ("diamond", 264),
    ("iron ingot", 265),
    ("gold ingot", 266),
    ("iron sword", 267),
    ("wooden sword", 268),
    ("wooden shovel", 269),
    ("wooden pickaxe", 270),
    ("wooden axe", 271),
    ("stone sword", 272),
    ("stone shovel", 273),
    ("stone pickaxe", 274),
    ("stone axe", 275),
    ("diamond sword", 276),
    ("diamond shovel", 277),
    ("diamond pickaxe", 278),
    ("diamond axe", 279),
    ("stick", 280),
    ("bowl", 281),
    ("mushroom soup", 282),
    ("gold sword", 283),
    ("gold shovel", 284),
    ("gold pickaxe", 285),
    ("gold axe", 286),
    ("string", 287),
    ("feather", 288),
    ("gunpowder", 289),
    ("sulphur", 289),
    ("wooden hoe", 290),
    ("stone hoe", 291),
    ("iron hoe", 292),
    ("diamond hoe", 293),
    ("gold hoe", 294),
    ("seeds", 295),
    ("wheat", 296),
    ("bread", 297),
    ("leather helmet", 298),
    ("leather chestplate", 299),
    ("leather leggings", 300),
    ("leather boots", 301),
    ("chainmail helmet", 302),
    ("chainmail chestplate", 303),
    ("chainmail leggings", 304),
    ("chainmail boots", 305),
    ("iron helmet", 306),
    ("iron chestplate", 307),
    ("iron leggings", 308),
    ("iron boots", 309),
    ("diamond helmet", 310),
    ("diamond chestplate", 311),
    ("diamond leggings", 312),
    ("diamond boots", 313),
    ("gold helmet", 314),
    ("gold chestplate", 315),
    ("gold leggings", 316),
    ("gold boots", 317),
    ("flint", 318),
    ("raw porkchop", 319),
    ("pork", 319),
    ("cooked porkchop", 320),
    ("painting", 321),
    ("golden apple", GOLDEN_APPLE),
    ("sign", 323),
    ("wooden door", 324),
    ("bucket", 325),
    ("water bucket", 326),
    ("lava bucket", 327),
    ("minecart", 328),
    ("saddle", 329),
    ("iron door", 330),
    ("redstone", 331),
    ("redstone dust", 331),
    ("snowball", 332),
    ("boat", 333),
    ("leather", 334),
    ("milk bucket", 335),
    ("clay brick", 336),
    ("clay", 337),
    ("clay balls", 337),
    ("sugar cane", 338),
    ("reeds", 338),
    ("paper", 339),
    ("book", 340),
    ("slimeball", 341),
    ("storage minecart", 342),
    ("powered minecart", 343),
    ("egg", 344),
    ("compass", 345),
    ("fishing rod", 346),
    ("clock", 347),
    ("watch", 347),
    ("glowstone dust", 348),
    ("raw fish", 349),
    ("cooked fish", 350),
    ("dye", 351),
    ("ink sack", 351),
    ("bone", 352),
    ("sugar", 353),
    ("cake", 354),
    ("bed", 355),
    ("redstone repeater", 356),
    ("cookie", 357),
    ("map", 358),
    ("shears", 359),
    ("gold record", 2256),
    ("green record", 2257),
];

/// Name → id lookup with first-character buckets for approximate matching.
pub struct ItemCatalog {
    by_name: HashMap<&'static str, ItemId>,
    buckets: BTreeMap<char, Vec<&'static str>>,
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCatalog {
    /// Build the catalog and its buckets from the static item table.
    pub fn new() -> Self {
        let mut by_name = HashMap::with_capacity(ITEMS.len());
        let mut buckets: BTreeMap<char, Vec<&'static str>> = BTreeMap::new();

        for &(name, id) in ITEMS {
            by_name.insert(name, id);
            if let Some(first) = name.chars().next() {
                buckets.entry(first).or_default().push(name);
            }
        }
        for bucket in buckets.values_mut() {
            bucket.sort_unstable();
        }

        Self {
            by_name,
            buckets,
        }
    }

    /// Resolve a token to an item id.
    ///
    /// All-digit tokens are taken as literal ids without consulting the
    /// table. Anything else goes through [`ItemCatalog::resolve_key`].
    pub fn resolve(&self, token: &str) -> Option<ItemId> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok();
        }
        let key = self.resolve_key(&token.to_lowercase())?;
        self.by_name.get(key).copied()
    }

    /// Exact, case-insensitive name lookup with no approximation.
    pub fn resolve_exact(&self, token: &str) -> Option<ItemId> {
        self.by_name.get(token.to_lowercase().as_str()).copied()
    }

    /// Find the catalog name for a lowercased key.
    ///
    /// An exact hit wins. Otherwise, among names in the key's bucket that
    /// contain the key or are contained in it, the one with the smallest
    /// length difference is chosen; the first in bucket order wins ties.
    pub fn resolve_key(&self, key: &str) -> Option<&'static str> {
        let first = key.chars().next()?;
        let bucket = self.buckets.get(&first)?;
        if let Some((&name, _)) = self.by_name.get_key_value(key) {
            return Some(name);
        }

        let mut best: Option<(usize, &'static str)> = None;
        for &candidate in bucket {
            let diff = if candidate.len() > key.len() {
                candidate.contains(key).then(|| candidate.len() - key.len())
            } else {
                key.contains(candidate).then(|| key.len() - candidate.len())
            };
            let Some(diff) = diff else { continue };
            match best {
                Some((shortest, _)) if diff >= shortest => {}
                _ => best = Some((diff, candidate)),
            }
        }
        best.map(|(_, name)| name)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.by_name.len()
    }
}
