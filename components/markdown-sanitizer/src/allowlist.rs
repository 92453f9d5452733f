//! Tag and attribute allowlists
//!
//! The sanitizer keeps an element only if its tag name is listed in a
//! [`TagAllowlist`], and keeps an attribute only if its name is listed in the
//! [`AttributeAllowlist`]. Attributes are allowed globally: the attribute set
//! is bound to the wildcard scope `"*"` and applies to every surviving tag.
//!
//! Names are matched case-sensitively. The HTML5 parser lowercases tag and
//! attribute names in the HTML namespace and restores the camelCase spelling
//! of SVG names (`clipPath`, `viewBox`), which is the spelling used here.
//!
//! # Default tables
//!
//! - Prose and structure: `div`, headings, paragraphs, emphasis, lists,
//!   links and images
//! - Code and tables: `code`, `pre`, `hr`, `table` and its parts, `sub`, `sup`
//! - SVG: the element set needed for inline diagrams. `script`,
//!   `foreignObject` and `style` are not part of it.
//!
//! The attribute table carries the hyperlink, image and dimension attributes
//! plus the SVG presentation and animation vocabulary. It has no `style`
//! attribute and no event handlers.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Pseudo-tag standing for bare text nodes
pub const TEXT_PSEUDO_TAG: &str = "#text";

/// Scope key under which the global attribute set is registered
pub const WILDCARD_SCOPE: &str = "*";

/// Prose, structural, code and table tags
const PROSE_TAGS: &[&str] = &[
    "div", "h1", "h2", "h3", "h4", "h5", "h6", "p", "em", "strong", "del", "ol", "ul", "li", "a",
    "img", TEXT_PSEUDO_TAG, "code", "pre", "hr", "table", "thead", "tbody", "th", "tr", "td",
    "sub", "sup",
];

/// SVG element names, excluding `foreignObject`, `style` and `script`
const SVG_TAGS: &[&str] = &[
    "svg",
    "altGlyph",
    "altGlyphDef",
    "altGlyphItem",
    "animate",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "circle",
    "clipPath",
    "color-profile",
    "cursor",
    "defs",
    "desc",
    "ellipse",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "filter",
    "font",
    "font-face",
    "font-face-format",
    "font-face-name",
    "font-face-src",
    "font-face-uri",
    "g",
    "glyph",
    "glyphRef",
    "hkern",
    "image",
    "line",
    "linearGradient",
    "marker",
    "mask",
    "metadata",
    "missing-glyph",
    "mpath",
    "path",
    "pattern",
    "polygon",
    "polyline",
    "radialGradient",
    "rect",
    "set",
    "stop",
    "switch",
    "symbol",
    "text",
    "textPath",
    "title",
    "tref",
    "tspan",
    "use",
    "view",
    "vkern",
];

/// Hyperlink, image and dimension attributes
const LINK_ATTRIBUTES: &[&str] = &["href", "src", "width", "height", "alt"];

/// SVG presentation and animation attributes (no `style`, no event handlers)
const SVG_ATTRIBUTES: &[&str] = &[
    "accent-height",
    "accumulate",
    "additive",
    "alignment-baseline",
    "allowReorder",
    "alphabetic",
    "amplitude",
    "arabic-form",
    "ascent",
    "attributeName",
    "attributeType",
    "autoReverse",
    "azimuth",
    "baseFrequency",
    "baseline-shift",
    "baseProfile",
    "bbox",
    "begin",
    "bias",
    "by",
    "calcMode",
    "cap-height",
    "class",
    "clip",
    "clipPathUnits",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "cx",
    "cy",
    "d",
    "decelerate",
    "descent",
    "diffuseConstant",
    "direction",
    "display",
    "divisor",
    "dominant-baseline",
    "dur",
    "dx",
    "dy",
    "edgeMode",
    "elevation",
    "enable-background",
    "end",
    "exponent",
    "externalResourcesRequired",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "filterRes",
    "filterUnits",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "format",
    "from",
    "fr",
    "fx",
    "fy",
    "g1",
    "g2",
    "glyph-name",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "glyphRef",
    "gradientTransform",
    "gradientUnits",
    "hanging",
    "height",
    "href",
    "hreflang",
    "horiz-adv-x",
    "horiz-origin-x",
    "id",
    "ideographic",
    "image-rendering",
    "in",
    "in2",
    "intercept",
    "k",
    "k1",
    "k2",
    "k3",
    "k4",
    "kernelMatrix",
    "kernelUnitLength",
    "kerning",
    "keyPoints",
    "keySplines",
    "keyTimes",
    "lang",
    "lengthAdjust",
    "letter-spacing",
    "lighting-color",
    "limitingConeAngle",
    "local",
    "marker-end",
    "marker-mid",
    "marker-start",
    "markerHeight",
    "markerUnits",
    "markerWidth",
    "mask",
    "maskContentUnits",
    "maskUnits",
    "mathematical",
    "max",
    "media",
    "method",
    "min",
    "mode",
    "name",
    "numOctaves",
    "offset",
    "opacity",
    "operator",
    "order",
    "orient",
    "orientation",
    "origin",
    "overflow",
    "overline-position",
    "overline-thickness",
    "panose-1",
    "paint-order",
    "path",
    "pathLength",
    "patternContentUnits",
    "patternTransform",
    "patternUnits",
    "ping",
    "pointer-events",
    "points",
    "pointsAtX",
    "pointsAtY",
    "pointsAtZ",
    "preserveAlpha",
    "preserveAspectRatio",
    "primitiveUnits",
    "r",
    "radius",
    "referrerPolicy",
    "refX",
    "refY",
    "rel",
    "rendering-intent",
    "repeatCount",
    "repeatDur",
    "requiredExtensions",
    "requiredFeatures",
    "restart",
    "result",
    "rotate",
    "rx",
    "ry",
    "scale",
    "seed",
    "shape-rendering",
    "slope",
    "spacing",
    "specularConstant",
    "specularExponent",
    "speed",
    "spreadMethod",
    "startOffset",
    "stdDeviation",
    "stemh",
    "stemv",
    "stitchTiles",
    "stop-color",
    "stop-opacity",
    "strikethrough-position",
    "strikethrough-thickness",
    "string",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "surfaceScale",
    "systemLanguage",
    "tabindex",
    "tableValues",
    "target",
    "targetX",
    "targetY",
    "text-anchor",
    "text-decoration",
    "text-rendering",
    "textLength",
    "to",
    "transform",
    "type",
    "u1",
    "u2",
    "underline-position",
    "underline-thickness",
    "unicode",
    "unicode-bidi",
    "unicode-range",
    "units-per-em",
    "v-alphabetic",
    "v-hanging",
    "v-ideographic",
    "v-mathematical",
    "values",
    "vector-effect",
    "version",
    "vert-adv-y",
    "vert-origin-x",
    "vert-origin-y",
    "viewBox",
    "viewTarget",
    "visibility",
    "width",
    "widths",
    "word-spacing",
    "writing-mode",
    "x",
    "x-height",
    "x1",
    "x2",
    "xChannelSelector",
    "y",
    "y1",
    "y2",
    "yChannelSelector",
    "z",
    "zoomAndPan",
];

/// Tags that no allowlist may ever contain
const FORBIDDEN_TAGS: &[&str] = &["script", "style", "foreignObject"];

/// Case-sensitive set of permitted tag names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAllowlist {
    names: HashSet<String>,
}

impl TagAllowlist {
    /// Check whether `tag_name` is permitted
    pub fn contains(&self, tag_name: &str) -> bool {
        self.names.contains(tag_name)
    }

    /// Whether bare text nodes survive
    pub fn allows_text(&self) -> bool {
        self.contains(TEXT_PSEUDO_TAG)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Case-sensitive set of permitted attribute names, applied to every tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAllowlist {
    names: HashSet<String>,
}

impl AttributeAllowlist {
    /// Check whether `attr_name` is permitted on any surviving element
    pub fn contains(&self, attr_name: &str) -> bool {
        self.names.contains(attr_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A tag allowlist paired with the global attribute allowlist
///
/// # Examples
///
/// ```
/// use markdown_sanitizer::allowlist::Allowlist;
///
/// let allowlist = Allowlist::standard();
/// assert!(allowlist.tags().contains("circle"));
/// assert!(!allowlist.tags().contains("script"));
/// assert!(allowlist.attributes().contains("viewBox"));
/// assert!(!allowlist.attributes().contains("onclick"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    tags: TagAllowlist,
    attributes: AttributeAllowlist,
}

impl Allowlist {
    /// The process-wide default allowlist
    pub fn standard() -> &'static Allowlist {
        static STANDARD: OnceLock<Allowlist> = OnceLock::new();
        STANDARD.get_or_init(|| {
            AllowlistBuilder::empty()
                .allow_tags(PROSE_TAGS.iter().copied())
                .allow_tags(SVG_TAGS.iter().copied())
                .allow_attributes(LINK_ATTRIBUTES.iter().copied())
                .allow_attributes(SVG_ATTRIBUTES.iter().copied())
                .build()
        })
    }

    /// Start a custom allowlist from the default tables
    pub fn builder() -> AllowlistBuilder {
        AllowlistBuilder::from(Self::standard().clone())
    }

    pub fn tags(&self) -> &TagAllowlist {
        &self.tags
    }

    pub fn attributes(&self) -> &AttributeAllowlist {
        &self.attributes
    }

    /// Attribute set registered under `scope`
    ///
    /// Only the wildcard scope exists; any other scope has no attributes of
    /// its own.
    pub fn attributes_for_scope(&self, scope: &str) -> Option<&AttributeAllowlist> {
        (scope == WILDCARD_SCOPE).then_some(&self.attributes)
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// Builder for custom allowlists
///
/// Script-capable tags (`script`, `style`, `foreignObject`) and event-handler
/// attributes (`on*`) are refused no matter what is requested.
#[derive(Debug, Clone)]
pub struct AllowlistBuilder {
    tags: HashSet<String>,
    attributes: HashSet<String>,
}

impl AllowlistBuilder {
    /// A builder that allows nothing
    pub fn empty() -> Self {
        Self {
            tags: HashSet::new(),
            attributes: HashSet::new(),
        }
    }

    pub fn allow_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(
            tags.into_iter()
                .map(Into::into)
                .filter(|tag| !is_forbidden_tag(tag)),
        );
        self
    }

    pub fn allow_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(
            attributes
                .into_iter()
                .map(Into::into)
                .filter(|attr| !is_event_handler(attr)),
        );
        self
    }

    pub fn deny_tags<'a, I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for tag in tags {
            self.tags.remove(tag);
        }
        self
    }

    pub fn deny_attributes<'a, I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for attr in attributes {
            self.attributes.remove(attr);
        }
        self
    }

    pub fn build(self) -> Allowlist {
        Allowlist {
            tags: TagAllowlist { names: self.tags },
            attributes: AttributeAllowlist {
                names: self.attributes,
            },
        }
    }
}

impl From<Allowlist> for AllowlistBuilder {
    fn from(allowlist: Allowlist) -> Self {
        Self {
            tags: allowlist.tags.names,
            attributes: allowlist.attributes.names,
        }
    }
}

fn is_forbidden_tag(tag: &str) -> bool {
    FORBIDDEN_TAGS.iter().any(|f| f.eq_ignore_ascii_case(tag))
}

fn is_event_handler(attr: &str) -> bool {
    attr.len() > 2
        && attr
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}
