use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::level::Rect;

/// Position component - top-left corner of the character's box in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_vec(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn as_vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Centre of the character's bounding box
    pub fn center(&self) -> Vec2 {
        self.as_vec() + Vec2::splat(CHARACTER_SIZE / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, CHARACTER_SIZE, CHARACTER_SIZE)
    }

    /// Centre-to-centre distance
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.center().distance(other.center())
    }
}

/// Display name
#[derive(Debug, Clone)]
pub struct Name(pub String);

/// Current frame of the sprite animation; advanced by the presentation layer
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteFrame(pub u8);

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Player class - sets starting stats and attack cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerClass {
    Technician,
    Humanitarian,
}

/// Starting numbers for a player class
#[derive(Debug, Clone, Copy)]
pub struct ClassDef {
    pub attack_interval: f32,
    pub health: i32,
    pub energy: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub intellect: i32,
    pub speed: f32,
}

impl PlayerClass {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Technician => "Technician",
            PlayerClass::Humanitarian => "Humanitarian",
        }
    }

    pub fn def(&self) -> ClassDef {
        match self {
            PlayerClass::Technician => ClassDef {
                attack_interval: TECHNICIAN_ATTACK_INTERVAL,
                health: TECHNICIAN_HEALTH,
                energy: TECHNICIAN_ENERGY,
                strength: TECHNICIAN_STRENGTH,
                dexterity: TECHNICIAN_DEXTERITY,
                intellect: TECHNICIAN_INTELLECT,
                speed: TECHNICIAN_SPEED,
            },
            PlayerClass::Humanitarian => ClassDef {
                attack_interval: HUMANITARIAN_ATTACK_INTERVAL,
                health: HUMANITARIAN_HEALTH,
                energy: HUMANITARIAN_ENERGY,
                strength: HUMANITARIAN_STRENGTH,
                dexterity: HUMANITARIAN_DEXTERITY,
                intellect: HUMANITARIAN_INTELLECT,
                speed: HUMANITARIAN_SPEED,
            },
        }
    }
}

/// Health component. All writes go through clamping helpers so
/// `0 <= current <= max` always holds.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self::with_current(max, max)
    }

    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Signed change; negative amounts drain but never below zero
    pub fn heal(&mut self, amount: i32) {
        self.set(self.current.saturating_add(amount));
    }

    pub fn damage(&mut self, amount: i32) {
        self.set(self.current.saturating_sub(amount));
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Energy pool, clamped to [0, MAX_ENERGY]
#[derive(Debug, Clone, Copy)]
pub struct Energy {
    current: i32,
}

impl Energy {
    pub fn new(current: i32) -> Self {
        Self {
            current: current.clamp(0, MAX_ENERGY),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, MAX_ENERGY);
    }

    pub fn add(&mut self, amount: i32) {
        self.set(self.current.saturating_add(amount));
    }

    pub fn spend(&mut self, amount: i32) {
        self.set(self.current.saturating_sub(amount));
    }

    pub fn is_full(&self) -> bool {
        self.current >= MAX_ENERGY
    }
}

/// Stats component - character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub intellect: i32,
}

impl Stats {
    pub fn new(strength: i32, dexterity: i32, intellect: i32) -> Self {
        Self {
            strength,
            dexterity,
            intellect,
        }
    }
}

/// Movement speed in units per reference frame
#[derive(Debug, Clone, Copy)]
pub struct Speed(pub f32);

/// Experience and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub current: u32,
    pub level: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            current: 0,
            level: 1,
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

/// Gates attacks to one per `interval` seconds
#[derive(Debug, Clone, Copy)]
pub struct AttackCooldown {
    pub interval: f32,
    pub last_attack: Option<f32>,
}

impl AttackCooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_attack: None,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        self.last_attack
            .map_or(true, |last| now - last + TIME_EPSILON >= self.interval)
    }
}

/// When the player last took a hit; passive regeneration waits on it
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageRecord {
    pub last_received: Option<f32>,
}

impl DamageRecord {
    pub fn regen_allowed(&self, now: f32) -> bool {
        self.last_received
            .map_or(true, |last| now - last >= REGEN_DAMAGE_COOLDOWN)
    }
}

/// The three independently timed player bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    EnergyRegen,
    Damage,
    HealthRegen,
}

impl BonusKind {
    pub const ALL: [BonusKind; 3] = [
        BonusKind::EnergyRegen,
        BonusKind::Damage,
        BonusKind::HealthRegen,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimedBonus {
    pub magnitude: i32,
    pub expires_at: f32,
}

impl TimedBonus {
    /// Magnitude in effect at `now`; zero at or after expiry
    pub fn active(&self, now: f32) -> i32 {
        if now < self.expires_at {
            self.magnitude
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimedBonuses {
    pub energy_regen: TimedBonus,
    pub damage: TimedBonus,
    pub health_regen: TimedBonus,
}

impl TimedBonuses {
    pub fn get(&self, kind: BonusKind) -> &TimedBonus {
        match kind {
            BonusKind::EnergyRegen => &self.energy_regen,
            BonusKind::Damage => &self.damage,
            BonusKind::HealthRegen => &self.health_regen,
        }
    }

    pub fn get_mut(&mut self, kind: BonusKind) -> &mut TimedBonus {
        match kind {
            BonusKind::EnergyRegen => &mut self.energy_regen,
            BonusKind::Damage => &mut self.damage,
            BonusKind::HealthRegen => &mut self.health_regen,
        }
    }
}

/// How a character turns stats into damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageFormula {
    /// strength/2 + (dexterity + intellect)/4
    Standard,
    /// strength + dexterity/10
    Brute,
    /// strength/2 + intellect*2
    Scholar,
}

impl DamageFormula {
    pub fn compute(&self, stats: &Stats) -> i32 {
        match self {
            DamageFormula::Standard => stats.strength / 2 + (stats.dexterity + stats.intellect) / 4,
            DamageFormula::Brute => stats.strength + stats.dexterity / 10,
            DamageFormula::Scholar => stats.strength / 2 + stats.intellect * 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    ExhaustedStudent,
    ExcellentStudent,
}

/// Enemy marker carrying its kind
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Experience paid out when this entity is defeated
#[derive(Debug, Clone, Copy)]
pub struct ExpReward(pub u32);

/// Percent chance of an item drop on defeat
#[derive(Debug, Clone, Copy)]
pub struct DropChance(pub u8);

/// Enemy behavior phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiState {
    Chasing,
    Wandering {
        direction: Vec2,
        started_at: f32,
        duration: f32,
    },
    Waiting {
        started_at: f32,
        duration: f32,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyAi {
    pub state: AiState,
    pub last_seen_player: Option<f32>,
    /// Hold time after losing sight of the player
    pub grace_period: f32,
}

impl EnemyAi {
    pub fn new(state: AiState, grace_period: f32) -> Self {
        Self {
            state,
            last_seen_player: None,
            grace_period,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.state {
            AiState::Chasing => "Chasing",
            AiState::Wandering { .. } => "Wandering",
            AiState::Waiting { .. } => "Waiting",
        }
    }
}

/// Cat marker
#[derive(Debug, Clone, Copy)]
pub struct Cat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatBehavior {
    Idle,
    Fleeing { toward_right: bool },
}

/// Every item kind in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Water,
    Coffee,
    EnergyDrink,
    Tea,
    ChocolateBar,
    InstantNoodles,
    Shawarma,
    Pizza,
    SimplePen,
    UpgradedPen,
    BestStudentPen,
    LectureNotes,
    PracticeNotes,
    ExcellentStudentNotebook,
    Phone,
}

impl ItemKind {
    pub const ALL: [ItemKind; 15] = [
        ItemKind::Water,
        ItemKind::Coffee,
        ItemKind::EnergyDrink,
        ItemKind::Tea,
        ItemKind::ChocolateBar,
        ItemKind::InstantNoodles,
        ItemKind::Shawarma,
        ItemKind::Pizza,
        ItemKind::SimplePen,
        ItemKind::UpgradedPen,
        ItemKind::BestStudentPen,
        ItemKind::LectureNotes,
        ItemKind::PracticeNotes,
        ItemKind::ExcellentStudentNotebook,
        ItemKind::Phone,
    ];
}

/// One stack in the inventory. `durability` counts the uses left on the
/// unit currently in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryEntry {
    pub kind: ItemKind,
    pub count: u32,
    pub durability: u32,
}

/// Inventory component - a fixed number of slots, one item kind per slot
#[derive(Debug, Clone)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
    max_slots: usize,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_slots,
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Stack onto an existing slot or claim a free one.
    /// Returns false when every slot holds some other kind.
    pub fn add_item(&mut self, kind: ItemKind, count: u32, durability: u32) -> bool {
        if count == 0 {
            return true;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            entry.count += count;
            return true;
        }
        if self.entries.len() >= self.max_slots {
            return false;
        }
        self.entries.push(InventoryEntry {
            kind,
            count,
            durability,
        });
        true
    }

    /// Drop one unit of `kind`; the slot is freed when the count hits zero
    pub fn remove_item(&mut self, kind: ItemKind) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.kind == kind) else {
            return false;
        };
        let entry = &mut self.entries[index];
        entry.count = entry.count.saturating_sub(1);
        if entry.count == 0 {
            self.entries.remove(index);
        }
        true
    }

    pub fn get_all_items(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn entry(&self, kind: ItemKind) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn entry_mut(&mut self, kind: ItemKind) -> Option<&mut InventoryEntry> {
        self.entries.iter_mut().find(|e| e.kind == kind)
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.entry(kind).map_or(0, |e| e.count)
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.entry(kind).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_slots
    }
}
