//! Lifecycle reaction scenarios: what fires when an element's owning
//! document changes.

use std::cell::RefCell;
use std::rc::Rc;

use vellum_dom::{Constructor, Document, HtmlElement, Prototype, TagName, Window};

/// Shared event log plus an element whose callbacks append to it.
fn observed_element(tag: &str) -> (HtmlElement, Rc<RefCell<Vec<&'static str>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let connected_log = Rc::clone(&log);
    let disconnected_log = Rc::clone(&log);
    let element = HtmlElement::with_prototype(
        tag,
        Prototype::new()
            .on_connected(move || connected_log.borrow_mut().push("connected"))
            .on_disconnected(move || disconnected_log.borrow_mut().push("disconnected")),
    );
    (element, log)
}

/// A window whose registry defines `tag`.
fn defining_host(tag: &str) -> Rc<Window> {
    let window = Window::new(Document::new());
    window
        .custom_elements()
        .define(tag, &Constructor::new(Prototype::new()))
        .unwrap();
    window
}

#[test]
fn attaching_to_a_defining_document_fires_connected_only() {
    let window = defining_host("x-foo");
    let (element, log) = observed_element("x-foo");

    let changed = element.set_owner_document(Some(window.document()));
    assert!(changed);
    assert_eq!(*log.borrow(), ["connected"]);
}

#[test]
fn moving_between_defining_documents_fires_disconnected_then_connected() {
    let first = defining_host("x-foo");
    let second = defining_host("x-foo");
    let (element, log) = observed_element("x-foo");

    element.set_owner_document(Some(first.document()));
    log.borrow_mut().clear();

    element.set_owner_document(Some(second.document()));
    assert_eq!(*log.borrow(), ["disconnected", "connected"]);
}

#[test]
fn moving_to_a_non_defining_document_fires_only_disconnected() {
    let defining = defining_host("x-foo");
    let plain = Window::new(Document::new());
    let (element, log) = observed_element("x-foo");

    element.set_owner_document(Some(defining.document()));
    log.borrow_mut().clear();

    element.set_owner_document(Some(plain.document()));
    assert_eq!(*log.borrow(), ["disconnected"]);
}

#[test]
fn undefined_tag_fires_nothing_anywhere() {
    let first = Window::new(Document::new());
    let second = Window::new(Document::new());
    let (element, log) = observed_element("x-unknown");

    element.set_owner_document(Some(first.document()));
    element.set_owner_document(Some(second.document()));
    element.set_owner_document(None);
    assert!(log.borrow().is_empty());
}

#[test]
fn reassigning_the_same_document_is_a_no_op() {
    let window = defining_host("x-foo");
    let (element, log) = observed_element("x-foo");

    element.set_owner_document(Some(window.document()));
    log.borrow_mut().clear();

    let changed = element.set_owner_document(Some(window.document()));
    assert!(!changed);
    assert!(log.borrow().is_empty());
}

#[test]
fn detaching_from_a_defining_document_fires_disconnected() {
    let window = defining_host("x-foo");
    let (element, log) = observed_element("x-foo");

    element.set_owner_document(Some(window.document()));
    log.borrow_mut().clear();

    let changed = element.set_owner_document(None);
    assert!(changed);
    assert_eq!(*log.borrow(), ["disconnected"]);
}

#[test]
fn reactions_match_on_tag_name_not_on_construction() {
    // The element below was never built from the registered constructor;
    // its tag name matching the definition is all that counts.
    let window = defining_host("x-foo");
    let (element, log) = observed_element("x-foo");

    element.set_owner_document(Some(window.document()));
    assert_eq!(*log.borrow(), ["connected"]);
}

#[test]
fn elements_without_callbacks_still_move_silently() {
    let window = defining_host("x-foo");
    let element = HtmlElement::new("x-foo");

    assert!(element.set_owner_document(Some(window.document())));
    assert!(element.set_owner_document(None));
    assert!(element.owner_document().is_none());
}

#[test]
fn constructed_elements_carry_the_registered_callbacks() {
    let window = Window::new(Document::new());
    let log = Rc::new(RefCell::new(Vec::new()));
    let connected_log = Rc::clone(&log);

    let tag = TagName::new("x-made").unwrap();
    let ctor = Constructor::new(
        Prototype::new().on_connected(move || connected_log.borrow_mut().push("connected")),
    );
    window.custom_elements().define("x-made", &ctor).unwrap();

    let element = ctor.construct(&tag).unwrap();
    element.set_owner_document(Some(window.document()));
    assert_eq!(*log.borrow(), ["connected"]);
}

#[test]
fn detached_document_has_no_registry_to_consult() {
    // A document never adopted by a window: ownership changes succeed but
    // no reactions can fire.
    let orphan = Document::new();
    let (element, log) = observed_element("x-foo");

    assert!(element.set_owner_document(Some(&orphan)));
    assert!(log.borrow().is_empty());
}
