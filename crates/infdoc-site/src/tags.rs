//! Built-in documentation tags.
//!
//! | Tag | Self-closing | Purpose |
//! |-----|--------------|---------|
//! | `callout` | no | Note or warning box |
//! | `figure` | yes | Image with caption |
//! | `quick-links` | no | Grid of quick links |
//! | `quick-link` | yes | One card in the grid |
//! | `codes` | no | Multi-language code sample with a language switcher |
//! | `code-java` | no | Java variant of a code sample |
//! | `code-kotlin` | no | Kotlin variant of a code sample |
//! | `code-icon` | yes | Language icon |

use infdoc_tags::{
    AttributeSpec, ContentNode, Element, ResolvedAttributes, TagDefinition, TagError, TagRegistry,
    TagRegistryBuilder,
};
use infdoc_toggle::{LANGUAGE_MARKER_ATTR, Language};

/// Attribute placed on language switcher buttons.
pub const SELECT_LANGUAGE_ATTR: &str = "data-select-language";

/// Build the frozen registry holding every built-in tag.
///
/// # Errors
///
/// Only fails if a built-in definition is inconsistent, which the tests
/// rule out.
pub fn builtin_registry() -> Result<TagRegistry, TagError> {
    let mut builder = TagRegistry::builder();
    register_builtin_tags(&mut builder)?;
    Ok(builder.build())
}

/// Register the built-in tags on an existing builder, so hosts can add
/// their own tags before freezing.
///
/// # Errors
///
/// Returns [`TagError::DuplicateTag`] if the builder already holds a tag
/// with a built-in name.
pub fn register_builtin_tags(builder: &mut TagRegistryBuilder) -> Result<(), TagError> {
    builder.register(
        TagDefinition::new("callout", render_callout)
            .with_description("Highlighted note or warning.")
            .with_attribute(AttributeSpec::string("title"))
            .with_attribute(
                AttributeSpec::string("type")
                    .with_default("note")
                    .with_allowed(["note", "warning"])
                    .critical(),
            ),
    )?;

    builder.register(
        TagDefinition::new("figure", render_figure)
            .with_self_closing()
            .with_description("Image with an optional caption.")
            .with_attribute(AttributeSpec::string("src"))
            .with_attribute(AttributeSpec::string("alt"))
            .with_attribute(AttributeSpec::string("caption")),
    )?;

    builder.register(
        TagDefinition::new("quick-links", render_quick_links)
            .with_description("Grid of quick-link cards."),
    )?;

    builder.register(
        TagDefinition::new("quick-link", render_quick_link)
            .with_self_closing()
            .with_description("Card linking to another page.")
            .with_attribute(AttributeSpec::string("title"))
            .with_attribute(AttributeSpec::string("description"))
            .with_attribute(AttributeSpec::string("icon"))
            .with_attribute(AttributeSpec::string("href")),
    )?;

    builder.register(
        TagDefinition::new("codes", render_codes)
            .with_description("Code sample shown in one language at a time."),
    )?;

    builder.register(
        TagDefinition::new("code-java", render_code_java)
            .with_description("Java variant of a code sample."),
    )?;

    builder.register(
        TagDefinition::new("code-kotlin", render_code_kotlin)
            .with_description("Kotlin variant of a code sample."),
    )?;

    builder.register(
        TagDefinition::new("code-icon", render_code_icon)
            .with_self_closing()
            .with_description("Icon for a code language.")
            .with_attribute(
                AttributeSpec::string("type")
                    .with_default(Language::default().code())
                    .with_allowed(Language::codes()),
            ),
    )?;

    Ok(())
}

fn render_callout(attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
    let kind = attrs.str("type").unwrap_or("note");
    let mut callout = Element::new("div")
        .with_attr("class", format!("callout callout-{kind}"))
        .with_attr("role", if kind == "warning" { "alert" } else { "note" });

    if let Some(title) = attrs.str("title") {
        callout = callout.with_child(
            Element::new("p")
                .with_attr("class", "callout-title")
                .with_child(ContentNode::text(title)),
        );
    }

    callout
        .with_child(
            Element::new("div")
                .with_attr("class", "callout-body")
                .with_children(children),
        )
        .into()
}

fn render_figure(attrs: &ResolvedAttributes, _children: Vec<ContentNode>) -> ContentNode {
    let image = Element::new("img")
        .with_optional_attr("src", attrs.str("src"))
        .with_attr("alt", attrs.str("alt").unwrap_or_default());

    let mut figure = Element::new("figure").with_child(image);
    if let Some(caption) = attrs.str("caption") {
        figure = figure.with_child(Element::new("figcaption").with_child(ContentNode::text(caption)));
    }
    figure.into()
}

fn render_quick_links(_attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
    Element::new("div")
        .with_attr("class", "quick-links")
        .with_children(children)
        .into()
}

fn render_quick_link(attrs: &ResolvedAttributes, _children: Vec<ContentNode>) -> ContentNode {
    let mut card = Element::new("div").with_attr("class", "quick-link");

    if let Some(icon) = attrs.str("icon") {
        card = card.with_child(
            Element::new("span")
                .with_attr("class", format!("quick-link-icon icon-{icon}"))
                .with_attr("aria-hidden", "true"),
        );
    }

    let title = ContentNode::text(attrs.str("title").unwrap_or_default());
    let heading = match attrs.str("href") {
        Some(href) => Element::new("h2").with_child(
            Element::new("a")
                .with_attr("href", href)
                .with_child(title),
        ),
        None => Element::new("h2").with_child(title),
    };
    card = card.with_child(heading);

    if let Some(description) = attrs.str("description") {
        card = card.with_child(Element::new("p").with_child(ContentNode::text(description)));
    }
    card.into()
}

/// Language switcher followed by the variants.
fn render_codes(_attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
    let buttons = Language::ALL.into_iter().map(|lang| {
        ContentNode::from(
            Element::new("button")
                .with_attr("type", "button")
                .with_attr(SELECT_LANGUAGE_ATTR, lang.code())
                .with_child(ContentNode::text(lang.label())),
        )
    });

    Element::new("div")
        .with_attr("class", "codes")
        .with_child(
            Element::new("div")
                .with_attr("class", "codes-languages")
                .with_attr("role", "group")
                .with_children(buttons),
        )
        .with_children(children)
        .into()
}

fn render_code_java(_attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
    language_block(Language::Java, children)
}

fn render_code_kotlin(_attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
    language_block(Language::Kotlin, children)
}

/// A block tagged with a language marker, picked up by the page toggle.
fn language_block(lang: Language, children: Vec<ContentNode>) -> ContentNode {
    Element::new("span")
        .with_attr(LANGUAGE_MARKER_ATTR, lang.code())
        .with_children(children)
        .into()
}

fn render_code_icon(attrs: &ResolvedAttributes, _children: Vec<ContentNode>) -> ContentNode {
    let code = attrs.str("type").unwrap_or(Language::default().code());
    Element::new("span")
        .with_attr("class", format!("code-icon code-icon-{code}"))
        .with_attr("aria-hidden", "true")
        .into()
}
