#![forbid(unsafe_code)]

//! Wiring a host through the public prelude.

use std::collections::HashMap;

use retrace::prelude::*;

/// A document outline: nodes keyed by path, focus is one node at a time.
#[derive(Default)]
struct Outline {
    nodes: HashMap<&'static str, bool>,
    focused: Option<&'static str>,
    changed: bool,
}

impl HandleResolver for Outline {
    type Handle = &'static str;

    fn is_alive(&self, handle: &&'static str) -> bool {
        self.nodes.get(handle).copied().unwrap_or(false)
    }
}

impl HostFocus for Outline {
    fn active_item(&self) -> Option<&'static str> {
        self.focused
    }

    fn selected_items(&self) -> Vec<&'static str> {
        self.focused.into_iter().collect()
    }

    fn context(&self) -> Option<&'static str> {
        None
    }

    fn set_focus(&mut self, active: Option<&&'static str>, _context: Option<&&'static str>) {
        let next = active.copied();
        if next != self.focused {
            self.focused = next;
            self.changed = true;
        }
    }

    fn set_selected_items(&mut self, _items: &[&'static str]) {}
}

fn focus(nav: &mut Navigator<Outline>, node: &'static str) {
    nav.host_mut().set_focus(Some(&node), None);
    settle(nav);
}

fn settle(nav: &mut Navigator<Outline>) {
    if std::mem::take(&mut nav.host_mut().changed) {
        nav.on_external_focus_changed();
    }
}

#[test]
fn outline_navigation() -> Result<()> {
    let outline = Outline {
        nodes: [("intro", true), ("body", true), ("appendix", true)].into(),
        ..Default::default()
    };
    let config = NavigatorConfig::from_toml_str("capacity = 4\n[bindings]\nclear = \"ctrl+shift+h\"\n")?;
    let mut nav = Navigator::from_config(outline, &config)?;

    focus(&mut nav, "intro");
    focus(&mut nav, "body");
    focus(&mut nav, "appendix");

    let clear: KeyChord = "ctrl+shift+h".parse()?;
    assert_eq!(nav.bindings().chord_for(HistoryCommand::Clear), Some(clear));

    nav.host_mut().nodes.insert("body", false);
    assert!(nav.back());
    settle(&mut nav);
    assert_eq!(nav.host().focused, Some("intro"));
    assert_eq!(nav.len(), 2);

    let mut list = HistoryList::new();
    list.sync(&nav);
    let rows: Vec<_> = list
        .entries()
        .iter()
        .map(|row| row.snapshot.to_string())
        .collect();
    assert_eq!(rows, vec!["\"appendix\"", "\"intro\""]);
    Ok(())
}
