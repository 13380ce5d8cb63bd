use std::fs;
use std::io::Cursor;

use flystate::config::StoreConfig;
use flystate::host::{CommandOutcome, CommandSender, FlyPlugin, Player, ScriptHost, Trigger};
use flystate::state::{FlyState, LoadError, StateStore};

struct Console;

impl CommandSender for Console {
    fn send_message(&mut self, _message: &str) {}
}

struct Steve {
    flying: bool,
}

impl CommandSender for Steve {
    fn send_message(&mut self, _message: &str) {}

    fn as_player(&mut self) -> Option<&mut dyn Player> {
        Some(self)
    }
}

impl Player for Steve {
    fn name(&self) -> &str {
        "Steve"
    }

    fn set_allow_flight(&mut self, allow: bool) {
        self.flying = allow;
    }
}

fn store_config(dir: &std::path::Path) -> StoreConfig {
    StoreConfig {
        data_dir: Some(dir.join("plugins").join("XFly")),
        ..StoreConfig::default()
    }
}

#[test]
fn test_enable_creates_data_dir_and_starts_empty() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());

    let plugin = FlyPlugin::enable(&config).unwrap();

    assert!(temp.path().join("plugins/XFly").is_dir());
    assert!(plugin.store().is_empty());
}

#[test]
fn test_state_survives_disable_enable_cycle() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());

    let mut plugin = FlyPlugin::enable(&config).unwrap();
    let mut steve = Steve { flying: false };
    plugin.on_command(&mut steve, Trigger::Fly, &[]);
    plugin.disable().unwrap();

    assert!(temp.path().join("plugins/XFly/playerFlyState.bin").exists());

    let plugin = FlyPlugin::enable(&config).unwrap();
    let mut rejoined = Steve { flying: false };
    assert_eq!(plugin.on_player_join(&mut rejoined), FlyState::Enabled);
    assert!(rejoined.flying);
}

#[test]
fn test_console_grant_leaves_store_unchanged() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());

    let mut plugin = FlyPlugin::enable(&config).unwrap();
    let before = plugin.store().clone();

    let outcome = plugin.on_command(&mut Console, Trigger::Fly, &[]);

    assert_eq!(outcome, CommandOutcome::NotAPlayer);
    assert_eq!(plugin.store(), &before);
}

#[test]
fn test_enable_fails_on_corrupt_store() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());
    let path = config.store_file().path().to_path_buf();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"garbage garbage garbage").unwrap();

    let err = FlyPlugin::enable(&config).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt { .. }));
}

#[test]
fn test_disable_reports_save_failure() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());
    let mut plugin = FlyPlugin::enable(&config).unwrap();
    plugin.on_command(&mut Steve { flying: false }, Trigger::Fly, &[]);

    fs::remove_dir_all(temp.path().join("plugins")).unwrap();

    assert!(plugin.disable().is_err());
}

#[test]
fn test_script_host_replays_events() {
    let temp = tempfile::tempdir().unwrap();
    let config = store_config(temp.path());
    let mut plugin = FlyPlugin::enable(&config).unwrap();

    let script = "\
# alice learns to fly, bob tries with an argument
cmd alice fly
cmd bob fly alice
console fly
join carol
cmd alice fly-stop
cmd alice fly
hover
cmd bob soar
";
    let mut out = Vec::new();
    let errors = {
        let mut host = ScriptHost::new(&mut plugin);
        host.run(Cursor::new(script), &mut out).unwrap();
        assert_eq!(host.allows_flight("alice"), Some(true));
        assert_eq!(host.allows_flight("bob"), Some(false));
        assert_eq!(host.allows_flight("carol"), Some(false));
        host.errors()
    };

    assert_eq!(errors, 2);
    assert_eq!(plugin.store().get("alice"), FlyState::Enabled);
    assert!(!plugin.store().contains("bob"));
    assert!(!plugin.store().contains("carol"));

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[alice] Flying has been enabled."));
    assert!(out.contains("[alice] Flying has been disabled."));
    assert!(out.contains("[bob] Invalid number of arguments."));
    assert!(out.contains("Usage: /fly"));
    assert!(out.contains("[console] This command can only be executed by a player."));
    assert!(out.contains("carol allow_flight=false"));
    assert!(out.contains("line 8: Unknown event: hover"));
    assert!(out.contains("Unknown command: soar"));

    plugin.disable().unwrap();
    let saved = StateStore::load(config.store_file().path()).unwrap();
    assert_eq!(saved.get("alice"), FlyState::Enabled);
}
