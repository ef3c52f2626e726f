//! Item definitions - all item properties in one place.
//!
//! This module provides a data-driven approach to item properties.
//! Instead of scattering match statements across the codebase,
//! all item attributes are defined in a single static table.

use crate::components::ItemKind;

/// Categories of items for behavior grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Eaten or drunk; instant and/or timed effects
    Food,
    /// Held, never used; the best one adds to attack damage
    Pen,
    /// Read for intellect and experience
    Study,
}

/// Complete definition of an item's properties
#[derive(Debug)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub name: &'static str,
    pub flavor: &'static str,
    pub category: ItemCategory,
    /// Uses per unit
    pub durability: u32,
    /// Seconds the timed bonuses last; 0 for instant items
    pub duration: f32,
    pub health_bonus: i32,
    pub energy_bonus: i32,
    pub energy_regen_bonus: i32,
    pub health_regen_bonus: i32,
    pub damage_bonus: i32,
    pub intellect_bonus: i32,
    pub dexterity_bonus: i32,
    pub exp_bonus: u32,
}

/// Get the definition for an item kind
pub fn get_def(kind: ItemKind) -> &'static ItemDef {
    // ITEM_DEFS is laid out in declaration order of ItemKind
    &ITEM_DEFS[kind as usize]
}

pub fn is_usable(kind: ItemKind) -> bool {
    get_def(kind).category != ItemCategory::Pen
}

/// Damage a pen adds while held
pub fn pen_damage(kind: ItemKind) -> Option<i32> {
    let def = get_def(kind);
    (def.category == ItemCategory::Pen).then_some(def.damage_bonus)
}

/// Multi-line text for the item description popup
pub fn describe(kind: ItemKind) -> String {
    let def = get_def(kind);
    let mut lines = vec![def.name.to_string(), def.flavor.to_string()];
    let signed = |label: &str, v: i32| format!("{}: {:+}", label, v);

    if def.health_bonus != 0 {
        lines.push(signed("Health", def.health_bonus));
    }
    if def.energy_bonus != 0 {
        lines.push(signed("Energy", def.energy_bonus));
    }
    if def.energy_regen_bonus != 0 {
        lines.push(signed("Energy regen", def.energy_regen_bonus));
    }
    if def.health_regen_bonus != 0 {
        lines.push(signed("Health regen", def.health_regen_bonus));
    }
    if def.damage_bonus != 0 {
        lines.push(signed("Damage", def.damage_bonus));
    }
    if def.intellect_bonus != 0 {
        lines.push(signed("Intellect", def.intellect_bonus));
    }
    if def.dexterity_bonus != 0 {
        lines.push(signed("Dexterity", def.dexterity_bonus));
    }
    if def.exp_bonus != 0 {
        lines.push(format!("Experience: +{}", def.exp_bonus));
    }
    lines.push(format!("Uses: {}", def.durability));
    if def.duration > 0.0 {
        lines.push(format!("Duration: {}s", def.duration));
    }
    lines.join("\n")
}

const BLANK: ItemDef = ItemDef {
    kind: ItemKind::Water,
    name: "",
    flavor: "",
    category: ItemCategory::Food,
    durability: 1,
    duration: 0.0,
    health_bonus: 0,
    energy_bonus: 0,
    energy_regen_bonus: 0,
    health_regen_bonus: 0,
    damage_bonus: 0,
    intellect_bonus: 0,
    dexterity_bonus: 0,
    exp_bonus: 0,
};

/// Static table of all item definitions
pub static ITEM_DEFS: &[ItemDef] = &[
    // =========================================================================
    // FOOD
    // =========================================================================
    ItemDef {
        kind: ItemKind::Water,
        name: "Water",
        flavor: "A bottle from the corner shop.",
        health_bonus: 20,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::Coffee,
        name: "Coffee",
        flavor: "Keeps you going through the night.",
        duration: 30.0,
        energy_regen_bonus: 4,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::EnergyDrink,
        name: "Energy Drink",
        flavor: "Tastes like a deadline.",
        duration: 15.0,
        energy_bonus: 100,
        damage_bonus: 2,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::Tea,
        name: "Tea",
        flavor: "Slow and steady.",
        duration: 60.0,
        health_bonus: 10,
        energy_regen_bonus: 4,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::ChocolateBar,
        name: "Chocolate Bar",
        flavor: "Four hundred calories in one bar.",
        health_bonus: 30,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::InstantNoodles,
        name: "Instant Noodles",
        flavor: "Filling now, regrettable later.",
        duration: 15.0,
        health_bonus: 50,
        health_regen_bonus: -1,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::Shawarma,
        name: "Shawarma",
        flavor: "The canteen's finest.",
        duration: 30.0,
        health_bonus: 30,
        health_regen_bonus: 5,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::Pizza,
        name: "Pizza",
        flavor: "A whole one. Hands get greasy.",
        health_bonus: 100,
        dexterity_bonus: -1,
        ..BLANK
    },
    // =========================================================================
    // PENS
    // =========================================================================
    ItemDef {
        kind: ItemKind::SimplePen,
        name: "Simple Pen",
        flavor: "Writes, mostly.",
        category: ItemCategory::Pen,
        durability: 50,
        damage_bonus: 2,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::UpgradedPen,
        name: "Upgraded Pen",
        flavor: "Four colours, one click.",
        category: ItemCategory::Pen,
        durability: 10,
        damage_bonus: 5,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::BestStudentPen,
        name: "Best Student Pen",
        flavor: "Engraved. Heavy.",
        category: ItemCategory::Pen,
        durability: 75,
        damage_bonus: 20,
        ..BLANK
    },
    // =========================================================================
    // STUDY
    // =========================================================================
    ItemDef {
        kind: ItemKind::LectureNotes,
        name: "Lecture Notes",
        flavor: "Someone else's handwriting.",
        category: ItemCategory::Study,
        intellect_bonus: 1,
        exp_bonus: 10,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::PracticeNotes,
        name: "Practice Notes",
        flavor: "Worked examples with answers.",
        category: ItemCategory::Study,
        intellect_bonus: 2,
        exp_bonus: 25,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::ExcellentStudentNotebook,
        name: "Excellent Student's Notebook",
        flavor: "Every lecture, colour coded.",
        category: ItemCategory::Study,
        intellect_bonus: 3,
        exp_bonus: 100,
        ..BLANK
    },
    ItemDef {
        kind: ItemKind::Phone,
        name: "Phone",
        flavor: "Just one more video.",
        category: ItemCategory::Study,
        durability: 3,
        intellect_bonus: -1,
        exp_bonus: 50,
        ..BLANK
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_kind_order() {
        assert_eq!(ITEM_DEFS.len(), ItemKind::ALL.len());
        for kind in ItemKind::ALL {
            assert_eq!(get_def(kind).kind, kind);
        }
    }

    #[test]
    fn test_only_pens_have_pen_damage() {
        assert_eq!(pen_damage(ItemKind::BestStudentPen), Some(20));
        assert_eq!(pen_damage(ItemKind::EnergyDrink), None);
        assert!(!is_usable(ItemKind::SimplePen));
        assert!(is_usable(ItemKind::Phone));
    }

    #[test]
    fn test_describe_lists_bonuses() {
        let text = describe(ItemKind::InstantNoodles);
        assert!(text.starts_with("Instant Noodles"));
        assert!(text.contains("Health: +50"));
        assert!(text.contains("Health regen: -1"));
        assert!(text.contains("Duration: 15s"));
    }
}
