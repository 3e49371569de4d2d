#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

//! Property tests for allocation invariants over arbitrary event sequences.

use std::collections::BTreeMap;

use framehue::{AllocError, Allocator, Color, Mode, PaletteConfig, ThemeIdentity, WindowId};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Acquire(u64),
    Release(u64),
    Migrate(Mode),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..24).prop_map(Op::Acquire),
        3 => (0u64..24).prop_map(Op::Release),
        1 => prop::bool::ANY.prop_map(|dark| Op::Migrate(if dark { Mode::Dark } else { Mode::Light })),
    ]
}

fn small_palette() -> impl Strategy<Value = PaletteConfig> {
    (1usize..8).prop_map(|n| {
        let light: Vec<Color> = (0..n).map(|i| Color::from(format!("#10{:02X}20", i * 16))).collect();
        let dark: Vec<Color> = (0..n).map(|i| Color::from(format!("#F0{:02X}E0", i * 16))).collect();
        PaletteConfig::new(light, dark)
    })
}

fn apply(alloc: &mut Allocator, op: Op) {
    match op {
        Op::Acquire(id) => {
            let _ = alloc.acquire(WindowId(id));
        }
        Op::Release(id) => {
            alloc.release(WindowId(id));
        }
        Op::Migrate(mode) => {
            alloc.migrate(mode);
        }
    }
}

/// Usage of each descriptor equals the number of windows holding it.
fn usage_matches_table(alloc: &Allocator) -> Result<(), TestCaseError> {
    let mut holders: BTreeMap<ThemeIdentity, u32> = BTreeMap::new();
    for (_, d) in alloc.assignments() {
        *holders.entry(d.identity()).or_default() += 1;
    }
    for d in alloc.palette().current() {
        let held = holders.get(&d.identity()).copied().unwrap_or(0);
        prop_assert_eq!(d.usage(), held, "usage mismatch for {}", d.identity());
    }
    Ok(())
}

// =============================================================================
// Usage consistency
// =============================================================================

proptest! {
    #[test]
    fn usage_always_equals_assignment_count(
        config in small_palette(),
        ops in prop::collection::vec(op(), 0..120),
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        for op in ops {
            apply(&mut alloc, op);
            usage_matches_table(&alloc)?;
        }
    }

    #[test]
    fn total_usage_equals_tracked_windows(
        config in small_palette(),
        ops in prop::collection::vec(op(), 0..120),
    ) {
        let mut alloc = Allocator::new(config, Mode::Dark);
        for op in ops {
            apply(&mut alloc, op);
            let total: u32 = alloc.palette().current().iter().map(|d| d.usage()).sum();
            prop_assert_eq!(total as usize, alloc.len());
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

proptest! {
    #[test]
    fn acquire_picks_minimum_key(
        config in small_palette(),
        ops in prop::collection::vec(op(), 0..80),
        probe in 100u64..200,
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        for op in ops {
            apply(&mut alloc, op);
        }

        let min_key = alloc
            .palette()
            .current()
            .iter()
            .map(|d| d.selection_key())
            .min()
            .expect("palette is non-empty");
        let before = alloc.palette().clone();

        let chosen = alloc.acquire(WindowId(probe)).expect("fresh window");
        let chosen_before = before.get(chosen.identity()).expect("same palette");
        prop_assert_eq!(chosen_before.selection_key(), min_key);
        prop_assert_eq!(chosen.usage(), chosen_before.usage() + 1);
    }

    #[test]
    fn acquired_stamps_strictly_increase(
        config in small_palette(),
        count in 1u64..40,
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        let mut last = 0;
        for id in 0..count {
            let d = alloc.acquire(WindowId(id)).expect("acquire");
            prop_assert!(d.last_used() > last);
            last = d.last_used();
        }
    }

    #[test]
    fn duplicate_acquire_changes_nothing(
        config in small_palette(),
        id in 0u64..24,
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        let first = alloc.acquire(WindowId(id)).expect("acquire");
        let before = alloc.snapshot();
        let err = alloc.acquire(WindowId(id)).unwrap_err();
        prop_assert_eq!(
            err,
            AllocError::DuplicateAssignment { window: WindowId(id), identity: first.identity() }
        );
        prop_assert_eq!(alloc.snapshot(), before);
    }
}

// =============================================================================
// Release
// =============================================================================

proptest! {
    #[test]
    fn second_release_is_noop(
        config in small_palette(),
        ids in prop::collection::vec(0u64..24, 1..30),
        target in 0u64..24,
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        for id in ids {
            let _ = alloc.acquire(WindowId(id));
        }
        alloc.release(WindowId(target));
        let before = alloc.snapshot();
        prop_assert!(alloc.release(WindowId(target)).is_none());
        prop_assert_eq!(alloc.snapshot(), before);
    }
}

// =============================================================================
// Migration
// =============================================================================

proptest! {
    #[test]
    fn migration_transplants_per_window_state(
        config in small_palette(),
        ops in prop::collection::vec(op(), 0..80),
        dark in prop::bool::ANY,
    ) {
        let mut alloc = Allocator::new(config, Mode::Light);
        for op in ops {
            apply(&mut alloc, op);
        }

        let before: Vec<_> = alloc
            .assignments()
            .map(|(w, d)| (w, d.identity(), d.usage(), d.last_used()))
            .collect();
        let target = if dark { Mode::Dark } else { Mode::Light };
        let report = alloc.migrate(target);
        prop_assert!(report.is_complete());
        prop_assert_eq!(report.remapped.len(), before.len());

        for (window, identity, usage, last_used) in before {
            let now = alloc.assignment(window).expect("still tracked");
            prop_assert_eq!(now.identity(), identity);
            prop_assert_eq!(now.usage(), usage);
            prop_assert_eq!(now.last_used(), last_used);
            prop_assert_eq!(now.mode(), target);
        }
        usage_matches_table(&alloc)?;
    }

    #[test]
    fn migration_with_short_target_drops_only_unmatched(
        n_light in 2usize..8,
        n_dark in 1usize..8,
        windows in 1u64..20,
    ) {
        let light: Vec<Color> = (0..n_light).map(|i| Color::from(format!("#20{:02X}20", i * 8))).collect();
        let dark: Vec<Color> = (0..n_dark).map(|i| Color::from(format!("#E0{:02X}E0", i * 8))).collect();
        let mut alloc = Allocator::new(PaletteConfig::new(light, dark), Mode::Light);
        for id in 0..windows {
            alloc.acquire(WindowId(id)).expect("acquire");
        }

        let report = alloc.migrate(Mode::Dark);
        for (_, identity) in &report.dropped {
            prop_assert!(identity.index() >= n_dark);
        }
        for (_, identity) in &report.remapped {
            prop_assert!(identity.index() < n_dark);
        }
        prop_assert_eq!(report.remapped.len() + report.dropped.len(), windows as usize);
        prop_assert_eq!(alloc.len(), report.remapped.len());
        usage_matches_table(&alloc)?;
    }
}
