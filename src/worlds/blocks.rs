//! Native rule engine for the reference blocks world.
//!
//! Three blocks `a`, `b`, `c` over four table slots `1`..`4`. A
//! configuration symbol has one character per block giving its support:
//! another block's letter or a slot digit. `bc1` reads as "a on b, b on
//! c, c on slot 1".
//!
//! Two loadable definitions:
//!
//! - `"blocks_world"`: state symbols are single configurations.
//! - `"blocks_world_target"`: state symbols are current++goal pairs of
//!   configurations (6 characters); the current-configuration query
//!   still reports 3 characters, as the goal half belongs to the
//!   environment session.
//!
//! The action universe is every syntactically well-formed `move(X,Y,Z)`;
//! whether a move applies in the current configuration is decided at
//! [`RuleEngine::apply`] time, and an inapplicable move is rejected
//! without mutating anything.

use crate::engine::{ActionQuery, ActionTerm, RuleEngine};

const BLOCKS: [char; 3] = ['a', 'b', 'c'];
const PLACES: [char; 7] = ['a', 'b', 'c', '1', '2', '3', '4'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Definition {
    /// Single-configuration symbols.
    Single,
    /// Paired current++goal symbols.
    Paired,
}

/// In-crate rule engine for the three-blocks/four-slots world.
///
/// ## Example
///
/// ```
/// use blocks_rl::engine::RuleEngine;
/// use blocks_rl::worlds::BlocksWorld;
///
/// let mut world = BlocksWorld::new();
/// assert!(world.load("blocks_world"));
/// assert_eq!(world.current_state().unwrap().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlocksWorld {
    definition: Option<Definition>,
    /// Legal configurations in enumeration order, cached at load.
    configs: Vec<[char; 3]>,
    /// Current support of each block, indexed like [`BLOCKS`].
    supports: [char; 3],
    initial: [char; 3],
}

impl BlocksWorld {
    /// Create an engine with no definition loaded.
    ///
    /// Queries on an unloaded engine fail closed (empty enumerations,
    /// no current configuration).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn symbol(config: &[char; 3]) -> String {
        config.iter().collect()
    }

    /// A configuration is legal when every support is a distinct other
    /// place and no block rests, transitively, on itself.
    fn legal(config: &[char; 3]) -> bool {
        for (i, &support) in config.iter().enumerate() {
            if support == BLOCKS[i] {
                return false;
            }
            for &other in &config[i + 1..] {
                if support == other {
                    return false;
                }
            }
        }

        // Follow each support chain; revisiting the starting block is a
        // cycle. Chains are at most BLOCKS.len() long.
        for (i, _) in config.iter().enumerate() {
            let start = BLOCKS[i];
            let mut support = config[i];
            for _ in 0..BLOCKS.len() {
                if support == start {
                    return false;
                }
                match block_index(support) {
                    Some(b) => support = config[b],
                    None => break,
                }
            }
        }

        true
    }

    fn enumerate_configs() -> Vec<[char; 3]> {
        let mut out = Vec::new();
        for &sa in PLACES.iter().filter(|&&p| p != 'a') {
            for &sb in PLACES.iter().filter(|&&p| p != 'b') {
                for &sc in PLACES.iter().filter(|&&p| p != 'c') {
                    let config = [sa, sb, sc];
                    if Self::legal(&config) {
                        out.push(config);
                    }
                }
            }
        }
        out
    }

    /// Parse a rendered `move(X,Y,Z)` term into its three arguments.
    fn parse_move(action: &str) -> Option<(char, char, char)> {
        let inner = action.strip_prefix("move(")?.strip_suffix(')')?;
        let mut parts = inner.split(',');
        let x = single_char(parts.next()?)?;
        let y = single_char(parts.next()?)?;
        let z = single_char(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some((x, y, z))
    }

    /// True when no block rests on `place`.
    fn clear(&self, place: char) -> bool {
        !self.supports.contains(&place)
    }
}

fn block_index(c: char) -> Option<usize> {
    BLOCKS.iter().position(|&b| b == c)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !PLACES.contains(&c) {
        return None;
    }
    Some(c)
}

impl RuleEngine for BlocksWorld {
    fn load(&mut self, definition: &str) -> bool {
        let definition = match definition {
            "blocks_world" => Definition::Single,
            "blocks_world_target" => Definition::Paired,
            _ => return false,
        };

        self.configs = Self::enumerate_configs();
        self.initial = self.configs[0];
        self.supports = self.initial;
        self.definition = Some(definition);
        true
    }

    fn query_states(&mut self) -> Vec<String> {
        match self.definition {
            None => Vec::new(),
            Some(Definition::Single) => self.configs.iter().map(Self::symbol).collect(),
            Some(Definition::Paired) => {
                let mut out = Vec::with_capacity(self.configs.len() * self.configs.len());
                for current in &self.configs {
                    for goal in &self.configs {
                        let mut symbol = Self::symbol(current);
                        symbol.push_str(&Self::symbol(goal));
                        out.push(symbol);
                    }
                }
                out
            }
        }
    }

    fn query_actions(&mut self) -> Vec<ActionQuery> {
        if self.definition.is_none() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for &x in &BLOCKS {
            for &y in PLACES.iter().filter(|&&p| p != x) {
                for &z in PLACES.iter().filter(|&&p| p != x && p != y) {
                    let (x, y, z) = (x.to_string(), y.to_string(), z.to_string());
                    out.push(ActionQuery::Term(ActionTerm::new(
                        "move",
                        &[x.as_str(), y.as_str(), z.as_str()],
                    )));
                }
            }
        }
        out.push(ActionQuery::Unbound);
        out
    }

    fn reset(&mut self) -> bool {
        if self.definition.is_none() {
            return false;
        }
        self.supports = self.initial;
        true
    }

    fn current_state(&mut self) -> Option<String> {
        self.definition.map(|_| Self::symbol(&self.supports))
    }

    fn apply(&mut self, action: &str) -> bool {
        if self.definition.is_none() {
            return false;
        }
        let Some((x, y, z)) = Self::parse_move(action) else {
            return false;
        };
        let Some(block) = block_index(x) else {
            return false;
        };

        // The block must sit on Y, be unburdened, and Z must be free.
        if self.supports[block] != y || z == x || !self.clear(x) || !self.clear(z) {
            return false;
        }

        self.supports[block] = z;
        true
    }
}
