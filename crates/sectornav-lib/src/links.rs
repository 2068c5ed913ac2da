use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::SectorId;

/// Map of blocked adjacent pairs: `blocked[from]` lists the neighbours that
/// cannot be entered from `from`. Absent entries mean nothing is blocked.
pub type BlockedLinks = BTreeMap<SectorId, BTreeSet<SectorId>>;

/// Topology rules in force during a single epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochRules {
    /// Whether diagonal moves are possible during this epoch.
    pub diagonal: bool,
    /// Blocked adjacent pairs, stored in the direction they were observed.
    pub blocked: BlockedLinks,
}

impl Default for EpochRules {
    fn default() -> Self {
        // Diagonal movement has been the rule in every epoch but one.
        Self {
            diagonal: true,
            blocked: BlockedLinks::new(),
        }
    }
}

impl EpochRules {
    /// Blocked entries whose reverse direction is absent from the table.
    ///
    /// Blocks have historically been bidirectional in practice, but the
    /// table stores one direction only; a loader can use this to flag
    /// entries that would make a link one-way passable.
    pub fn asymmetric_blocks(&self) -> Vec<(SectorId, SectorId)> {
        let mut retval = Vec::new();
        for (&from, targets) in &self.blocked {
            for &to in targets {
                let mirrored = self
                    .blocked
                    .get(&to)
                    .is_some_and(|back| back.contains(&from));
                if !mirrored {
                    retval.push((from, to));
                }
            }
        }
        retval
    }
}

/// Ordered table of epoch cutovers and the topology rules for each epoch.
///
/// This is configuration data, not algorithm logic: it is expected to be
/// maintained as a versioned external table and deserialized at load time.
/// Deserialization runs the same shape validation as [`LinkRegistry::new`].
/// Epoch `e` covers timestamps from `cutovers[e - 1]` (inclusive) up to
/// `cutovers[e]` (exclusive); timestamps before the first cutover resolve to
/// epoch 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegistryTable", into = "RegistryTable")]
pub struct LinkRegistry {
    cutovers: Vec<NaiveDateTime>,
    rules: Vec<EpochRules>,
}

/// On-disk shape of a [`LinkRegistry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryTable {
    cutovers: Vec<NaiveDateTime>,
    rules: Vec<EpochRules>,
}

impl TryFrom<RegistryTable> for LinkRegistry {
    type Error = Error;

    fn try_from(table: RegistryTable) -> Result<Self> {
        LinkRegistry::new(table.cutovers, table.rules)
    }
}

impl From<LinkRegistry> for RegistryTable {
    fn from(registry: LinkRegistry) -> Self {
        Self {
            cutovers: registry.cutovers,
            rules: registry.rules,
        }
    }
}

impl LinkRegistry {
    /// Build a registry from cutover instants and per-epoch rules. There
    /// must be exactly one more rule set than cutovers, and the cutovers
    /// must be strictly increasing.
    pub fn new(cutovers: Vec<NaiveDateTime>, rules: Vec<EpochRules>) -> Result<Self> {
        if rules.len() != cutovers.len() + 1 {
            return Err(Error::RuleCountMismatch {
                rules: rules.len(),
                cutovers: cutovers.len(),
            });
        }
        for (index, pair) in cutovers.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(Error::UnorderedCutovers { index: index + 1 });
            }
        }
        Ok(Self { cutovers, rules })
    }

    /// A registry with a single epoch covering all time. Useful for maps
    /// with no recorded topology history.
    pub fn constant(rules: EpochRules) -> Self {
        Self {
            cutovers: Vec::new(),
            rules: vec![rules],
        }
    }

    /// Number of epochs the registry knows about.
    pub fn epoch_count(&self) -> usize {
        self.rules.len()
    }

    /// Resolve a capture timestamp to its epoch.
    pub fn epoch_of(&self, timestamp: NaiveDateTime) -> usize {
        self.cutovers.partition_point(|&cutover| cutover <= timestamp)
    }

    /// The topology rules in force during `epoch`.
    pub fn rules(&self, epoch: usize) -> Option<&EpochRules> {
        self.rules.get(epoch)
    }

    /// Resolve a capture timestamp to its epoch and that epoch's rules.
    pub fn resolve(&self, timestamp: NaiveDateTime) -> (usize, &EpochRules) {
        let epoch = self.epoch_of(timestamp);
        // In bounds: there is always one more rule set than cutovers.
        (epoch, &self.rules[epoch])
    }
}

/// Whether a move from `from` into adjacent `to` is allowed: `to` must not
/// be blocked from `from` and must not be in the obstacle set.
///
/// Callers must independently confirm that the two sectors are adjacent;
/// this predicate will happily approve a move between distant sectors.
pub fn can_move(
    from: SectorId,
    to: SectorId,
    blocked: &BlockedLinks,
    obstacles: &HashSet<SectorId>,
) -> bool {
    if blocked.get(&from).is_some_and(|links| links.contains(&to)) {
        return false;
    }
    !obstacles.contains(&to)
}
