#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::{EnemyAction, PlayerCommand};
    use crate::components::*;
    use crate::config::GameConfig;
    use crate::constants::*;
    use crate::curves::FloatCurve;
    use crate::data_table::{RarityTable, WeaponDataTable};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::math::{finterp_to, mapped_range_clamped, normalize_axis};
    use crate::types::Rotator;

    fn smg() -> Weapon {
        let table = WeaponDataTable::builtin();
        Weapon::from_row(
            WeaponType::SubmachineGun,
            table.find_row(WeaponType::SubmachineGun),
        )
    }

    // ---- Item state table ----

    #[test]
    fn test_item_properties_table() {
        let pickup = ItemProperties::for_state(ItemState::Pickup);
        assert!(pickup.mesh_visible && !pickup.simulate_physics && !pickup.gravity);
        assert_eq!(pickup.mesh_collision, MeshCollision::None);
        assert!(pickup.area_overlap);

        let interping = ItemProperties::for_state(ItemState::EquipInterping);
        assert!(interping.mesh_visible && !interping.simulate_physics);
        assert!(!interping.area_overlap);

        let picked_up = ItemProperties::for_state(ItemState::PickedUp);
        assert!(!picked_up.mesh_visible);
        assert!(!picked_up.area_overlap);

        let equipped = ItemProperties::for_state(ItemState::Equipped);
        assert!(equipped.mesh_visible && !equipped.area_overlap);

        let falling = ItemProperties::for_state(ItemState::Falling);
        assert!(falling.mesh_visible && falling.simulate_physics && falling.gravity);
        assert_eq!(falling.mesh_collision, MeshCollision::BlockStatic);
        assert!(falling.area_overlap);
    }

    #[test]
    fn test_set_state_reapplies_full_row() {
        let mut item = Item::new("SMG", ItemKind::Weapon(smg()), ItemRarity::Common, 2);
        item.set_state(ItemState::Falling);
        item.set_state(ItemState::Falling);
        assert_eq!(item.properties(), ItemProperties::for_state(ItemState::Falling));
        item.set_state(ItemState::PickedUp);
        assert_eq!(item.state(), ItemState::PickedUp);
        assert_eq!(item.properties(), ItemProperties::for_state(ItemState::PickedUp));
    }

    #[test]
    fn test_leaving_pickup_hides_widget() {
        let mut item = Item::new("SMG", ItemKind::Weapon(smg()), ItemRarity::Common, 2);
        item.widget_visible = true;
        item.set_state(ItemState::EquipInterping);
        assert!(!item.widget_visible);
    }

    #[test]
    fn test_custom_depth_locked_while_flag_cleared() {
        let mut item = Item::new("SMG", ItemKind::Weapon(smg()), ItemRarity::Common, 2);
        item.can_change_custom_depth = false;
        item.enable_custom_depth();
        assert!(!item.custom_depth);
        item.can_change_custom_depth = true;
        item.enable_custom_depth();
        assert!(item.custom_depth);
    }

    #[test]
    fn test_rarity_stars() {
        let table = RarityTable::builtin();
        let row = table.row(ItemRarity::Rare);
        let item = Item::new(
            "AR",
            ItemKind::Weapon(smg()),
            ItemRarity::Rare,
            row.number_of_stars,
        );
        assert_eq!(item.active_stars, [true, true, true, true, false]);
    }

    // ---- Weapon ----

    #[test]
    fn test_weapon_defaults_without_row() {
        let weapon = Weapon::from_row(WeaponType::Pistol, None);
        assert_eq!(weapon.ammo(), DEFAULT_WEAPON_AMMO);
        assert_eq!(weapon.magazine_capacity(), DEFAULT_MAGAZINE_CAPACITY);
        assert_eq!(weapon.ammo_type, AmmoType::NineMm);
        assert_eq!(weapon.reload_montage_section, "ReloadSMG");
        assert!(weapon.automatic);
    }

    #[test]
    fn test_weapon_from_row() {
        let table = WeaponDataTable::builtin();
        let pistol = Weapon::from_row(WeaponType::Pistol, table.find_row(WeaponType::Pistol));
        assert_eq!(pistol.magazine_capacity(), 12);
        assert!(!pistol.automatic);
        assert_eq!(pistol.clip_bone_name, "pistol_clip");
    }

    #[test]
    fn test_decrement_ammo_floors_at_zero() {
        let mut weapon = smg();
        for _ in 0..40 {
            weapon.decrement_ammo();
        }
        assert_eq!(weapon.ammo(), 0);
        assert!(!weapon.has_ammo());
    }

    #[test]
    fn test_reload_ammo_fills_empty_space() {
        let mut weapon = smg();
        for _ in 0..25 {
            weapon.decrement_ammo();
        }
        assert_eq!(weapon.empty_space(), 25);
        weapon.reload_ammo(25);
        assert_eq!(weapon.ammo(), 30);
        assert!(weapon.clip_is_full());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflows magazine")]
    fn test_reload_overflow_asserts_in_debug() {
        let mut weapon = smg();
        weapon.decrement_ammo();
        weapon.reload_ammo(2);
    }

    // ---- Health ----

    #[test]
    fn test_health_clamps_to_zero() {
        let mut health = Health::new(100.0);
        assert!(!health.apply_damage(40.0));
        assert_eq!(health.current, 60.0);
        assert!(health.apply_damage(500.0));
        assert_eq!(health.current, 0.0);
        assert!(health.is_depleted());
    }

    // ---- Math ----

    #[test]
    fn test_finterp_to() {
        assert_eq!(finterp_to(0.0, 10.0, 0.1, 0.0), 10.0);
        let stepped = finterp_to(0.0, 10.0, 0.1, 5.0);
        assert!((stepped - 5.0).abs() < 1e-5);
        // dt * speed above 1 never overshoots
        assert_eq!(finterp_to(0.0, 10.0, 1.0, 30.0), 10.0);
    }

    #[test]
    fn test_mapped_range_clamped() {
        assert_eq!(mapped_range_clamped((0.0, 600.0), (0.0, 1.0), 300.0), 0.5);
        assert_eq!(mapped_range_clamped((0.0, 600.0), (0.0, 1.0), 900.0), 1.0);
        assert_eq!(mapped_range_clamped((0.0, 600.0), (0.0, 1.0), -5.0), 0.0);
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(190.0), -170.0);
        assert_eq!(normalize_axis(-190.0), 170.0);
        assert_eq!(normalize_axis(180.0), 180.0);
        assert_eq!(normalize_axis(720.0), 0.0);
    }

    #[test]
    fn test_rotator_axes() {
        let rot = Rotator::from_yaw(90.0);
        assert!((rot.forward() - Vec3::Y).length() < 1e-5);
        assert!((Rotator::ZERO.right() - Vec3::NEG_Y).length() < 1e-5);
        let up = Rotator::new(90.0, 0.0, 0.0).forward();
        assert!((up - Vec3::Z).length() < 1e-5);
        let from_dir = Rotator::from_direction(Vec3::new(0.0, -1.0, 0.0));
        assert!((from_dir.yaw + 90.0).abs() < 1e-4);
    }

    // ---- Curves ----

    #[test]
    fn test_float_curve_eval() {
        let curve = FloatCurve::new(vec![(1.0, 10.0), (0.0, 0.0)]);
        assert_eq!(curve.eval(-1.0), 0.0);
        assert_eq!(curve.eval(0.5), 5.0);
        assert_eq!(curve.eval(3.0), 10.0);
        assert_eq!(FloatCurve::default().eval(0.3), 0.0);
    }

    // ---- Data / config ----

    #[test]
    fn test_weapon_table_from_json() {
        let json = r#"{
            "Pistol": {
                "item_name": "Sidearm",
                "ammo_type": "NineMm",
                "weapon_ammo": 8,
                "magazine_capacity": 8,
                "automatic": false,
                "damage": 30.0,
                "headshot_damage": 90.0,
                "auto_fire_rate": 0.25,
                "reload_montage_section": "ReloadPistol",
                "clip_bone_name": "pistol_clip"
            }
        }"#;
        let table = WeaponDataTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        let row = table.find_row(WeaponType::Pistol).unwrap();
        assert_eq!(row.item_name, "Sidearm");
        assert!(row.muzzle_offset.is_none());
        assert!(table.find_row(WeaponType::AssaultRifle).is_none());
    }

    #[test]
    fn test_weapon_table_rejects_overfull_row() {
        let json = r#"{
            "Pistol": {
                "item_name": "Sidearm",
                "ammo_type": "NineMm",
                "weapon_ammo": 9,
                "magazine_capacity": 8,
                "automatic": false,
                "damage": 30.0,
                "headshot_damage": 90.0,
                "auto_fire_rate": 0.25,
                "reload_montage_section": "ReloadPistol",
                "clip_bone_name": "pistol_clip"
            }
        }"#;
        assert!(matches!(
            WeaponDataTable::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "seed": 7, "character": { "starting_9mm_ammo": 10 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.character.starting_9mm_ammo, 10);
        assert_eq!(config.character.starting_ar_ammo, STARTING_AR_AMMO);
        assert_eq!(config.character.interp_offsets.len(), INTERP_LOCATION_COUNT);
        assert!(config.weapons.find_row(WeaponType::Pistol).is_some());
    }

    #[test]
    fn test_config_parse_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_missing_file() {
        let err = GameConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }

    // ---- Commands ----

    #[test]
    fn test_player_command_tagged_json() {
        let json = serde_json::to_string(&PlayerCommand::InventoryKey { slot: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"InventoryKey","slot":3}"#);
        let back: PlayerCommand = serde_json::from_str(r#"{"type":"FirePressed"}"#).unwrap();
        assert_eq!(back, PlayerCommand::FirePressed);
    }

    #[test]
    fn test_enemy_action_tagged_json() {
        let action: EnemyAction =
            serde_json::from_str(r#"{"type":"ActivateWeapon","hand":"Left"}"#).unwrap();
        assert_eq!(
            action,
            EnemyAction::ActivateWeapon {
                hand: WeaponHand::Left
            }
        );
    }
}
