//! Render Pass Example - Block tree in action
//!
//! This example walks through what generated render code does on every
//! pass:
//! - merge base props with caller overrides
//! - open a block for the structurally stable region
//! - create children (static ones skipped, dynamic ones collected)
//! - close the block and read back the flat dynamic-children list
//! - reuse a hoisted static vnode on the next pass (cloned once mounted)
//!
//! Run with: cargo run -p spark-vdom --example render_pass

use std::rc::Rc;

use spark_vdom::{
    create_block, create_element_vnode, create_text_vnode, create_vnode, merge_props,
    normalize_vnode, open_block, open_block_count, reset_block_state, Children, ComponentDef,
    HostNode, PatchFlags, PropValue, PropsMap, RawChildren, VNodeChild, VNodeRef, VNodeType,
};

fn main() {
    reset_block_state();

    println!("=== spark-vdom Render Pass Example ===\n");

    // Props the way generated code composes them: a base mapping plus
    // caller overrides, classes concatenated rather than replaced.
    let base = Rc::new(PropsMap::from([
        ("class", "panel".into()),
        (
            "style",
            Rc::new(PropsMap::from([("padding", "1".into())])).into(),
        ),
    ]));
    let overrides = Rc::new(PropsMap::from([(
        "class",
        PropValue::List(vec!["panel--wide".into()]),
    )]));
    let props = Rc::new(merge_props(&[base, overrides]));
    println!(
        "merged class: {:?}",
        props.get("class").and_then(|v| v.as_str())
    );

    // One stable region: a static title, a dynamic counter line, a keyed
    // row list, and a footer component.
    open_block(false);

    let title = create_element_vnode("text", None, RawChildren::Text("Render demo".into()));

    let counter = create_text_vnode("count: 0", PatchFlags::TEXT);

    // The row list is a keyed fragment: its children are diffed by key,
    // so the fragment block collects nothing at its own level.
    open_block(true);
    let rows: Vec<VNodeChild> = (0..3)
        .map(|i| {
            let row_props = Rc::new(PropsMap::from([("key", PropValue::Int(i))]));
            VNodeChild::Node(create_vnode(
                VNodeType::element("row"),
                Some(row_props),
                RawChildren::Text(format!("row {i}")),
                PatchFlags::TEXT,
                None,
            ))
        })
        .collect();
    let list = create_block(
        VNodeType::Fragment,
        None,
        RawChildren::Nodes(rows),
        PatchFlags::KEYED_FRAGMENT,
        None,
    );

    let footer = create_vnode(
        VNodeType::Component(Rc::new(ComponentDef::named("Footer"))),
        None,
        RawChildren::None,
        PatchFlags::NONE,
        None,
    );

    let root = create_block(
        VNodeType::element("panel"),
        Some(props),
        RawChildren::Nodes(vec![
            VNodeChild::Node(title.clone()),
            VNodeChild::Node(counter),
            VNodeChild::Node(list),
            VNodeChild::Node(footer),
        ]),
        PatchFlags::NONE,
        None,
    );

    println!("open blocks after the pass: {}", open_block_count());
    println!("vnodes in the full tree:    {}", count_nodes(&root));

    let dynamic = root
        .dynamic_children
        .borrow()
        .clone()
        .expect("a block root always carries a list");
    println!("vnodes the patcher visits:  {}\n", dynamic.len());

    for vnode in &dynamic {
        println!(
            "  {:<12} patch_flag={:?}",
            label(vnode),
            vnode.patch_flag
        );
    }

    // The reconciler mounts the tree and binds display nodes. On the next
    // pass the hoisted static title is reused; once mounted, reuse yields a
    // fresh clone instead of the live node.
    title.el.set(Some(HostNode(1)));
    let reused = normalize_vnode(VNodeChild::Node(title.clone()));
    println!(
        "\nhoisted title reused after mount: fresh clone = {}, starts unmounted = {}",
        !Rc::ptr_eq(&reused, &title),
        !reused.is_mounted()
    );
}

fn count_nodes(vnode: &VNodeRef) -> usize {
    1 + match &vnode.children {
        Children::Nodes(nodes) => nodes
            .iter()
            .map(|child| match child {
                VNodeChild::Node(node) => count_nodes(node),
                _ => 1,
            })
            .sum(),
        _ => 0,
    }
}

fn label(vnode: &VNodeRef) -> String {
    match &vnode.vtype {
        VNodeType::Element(tag) => format!("<{tag}>"),
        VNodeType::Component(def) => def
            .name
            .clone()
            .unwrap_or_else(|| "Component".to_string()),
        VNodeType::FunctionalComponent(_) => "FunctionalComponent".to_string(),
        VNodeType::Fragment => "Fragment".to_string(),
        VNodeType::Text => "Text".to_string(),
        VNodeType::Empty => "Empty".to_string(),
        VNodeType::Portal => "Portal".to_string(),
    }
}
