// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion + modal: group exclusivity, scroll lock, and dismissal.
//!
//! This example shows how to:
//! - mark an accordion as a group boundary so only one panel stays open,
//! - open a modal that locks page scroll and drops its `aria-hidden` attribute,
//! - dismiss everything with `Escape`, then reopen and close on resize.
//!
//! Run:
//! - `cargo run -p understory_interaction_demos --example disclosure_group`

use kurbo::Point;
use understory_interaction::document::Document;
use understory_interaction::driver::Driver;
use understory_interaction::memory::{MemoryDocument, NodeId};

fn panel(doc: &mut MemoryDocument, group: NodeId, id: &str) -> NodeId {
    let header = doc.append_element(group, "button");
    doc.set_attribute(header, "data-toggle", "expanded");
    doc.set_attribute(header, "data-toggle-target", &format!("#{id}"));
    doc.set_attribute(header, "data-toggle-target-class", "open");
    doc.set_attribute(header, "data-reset", "escape");
    let body = doc.append_element(group, "section");
    doc.set_attribute(body, "id", id);
    header
}

fn report(doc: &MemoryDocument, driver: &Driver<NodeId>, label: &str) {
    println!("== {label}");
    for entry in driver.resolver().ledger().iter() {
        println!(
            "  {:?}: target={:?} tags={:?} scroll={:?}",
            entry.id(),
            entry.target.as_slice(),
            entry.reset_tags.iter().collect::<Vec<_>>(),
            entry.scroll_taken,
        );
    }
    println!(
        "  body classes={:?} position={:?}",
        doc.classes(doc.root()),
        doc.style(doc.root(), "position"),
    );
}

fn main() {
    let mut doc = MemoryDocument::new();
    let body = doc.root();

    let accordion = doc.append_element(body, "div");
    doc.set_attribute(accordion, "data-group-reset", "");
    let first = panel(&mut doc, accordion, "faq-1");
    let second = panel(&mut doc, accordion, "faq-2");

    let dialog = doc.append_element(body, "div");
    doc.set_attribute(dialog, "id", "dialog");
    doc.set_attribute(dialog, "aria-hidden", "true");
    let open_dialog = doc.append_element(body, "button");
    doc.set_attribute(open_dialog, "data-toggle", "");
    doc.set_attribute(open_dialog, "data-toggle-target", "#dialog");
    doc.set_attribute(open_dialog, "data-toggle-target-class", "visible");
    doc.set_attribute(open_dialog, "data-toggle-scroll", "disable");
    doc.set_attribute(open_dialog, "data-attr-target", "#dialog");
    doc.set_attribute(open_dialog, "data-attr-detach", "aria-hidden");
    doc.set_attribute(open_dialog, "data-reset", "escape resize");
    let label = doc.append_element(open_dialog, "span");

    doc.scroll_to(Point::new(0.0, 640.0));
    let mut driver = Driver::default();

    println!("{:?}", driver.on_click(&mut doc, first));
    println!("{:?}", driver.on_click(&mut doc, second));
    report(&doc, &driver, "second panel replaced the first");

    // A click on a child bubbles up to the nearest trigger.
    println!("{:?}", driver.on_click(&mut doc, label));
    report(&doc, &driver, "modal open");
    println!(
        "  dialog aria-hidden={:?}",
        doc.attribute(dialog, "aria-hidden")
    );

    let dismissed = driver.on_key(&mut doc, "Escape");
    report(&doc, &driver, &format!("escape dismissed {dismissed}"));
    println!(
        "  dialog aria-hidden={:?} scroll={:?}",
        doc.attribute(dialog, "aria-hidden"),
        doc.scroll_position()
    );

    let _ = driver.on_click(&mut doc, open_dialog);
    let mut now = 10_000;
    for _ in 0..5 {
        driver.on_resize(now);
        now += 50;
    }
    while let Some(due) = driver.next_deadline() {
        let fired = driver.poll(&mut doc, due);
        println!("poll at {due}ms fired {fired}");
    }
    report(&doc, &driver, "resize settled");
}
