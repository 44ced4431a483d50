// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client marker rule sets and technology documentation links

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{AttributeMarker, GlobalMarker, RuleSet, ScriptKeyword};

const fn global(
    identifier: &'static str,
    label: &'static str,
    version_property: Option<&'static str>,
) -> GlobalMarker {
    GlobalMarker {
        identifier,
        label,
        version_property,
    }
}

const fn attrs(attributes: &'static [&'static str], label: &'static str) -> AttributeMarker {
    AttributeMarker { attributes, label }
}

const fn kw(keyword: &'static str, label: &'static str) -> ScriptKeyword {
    ScriptKeyword { keyword, label }
}

/// Page-level frameworks
pub const PAGE_RULES: RuleSet = RuleSet {
    name: "technologies",
    globals: &[
        global("jQuery", "jQuery", Some("fn.jquery")),
        global("angular", "AngularJS", Some("version.full")),
        global("React", "React", Some("version")),
        global("Vue", "Vue.js", Some("version")),
        global("Ember", "Ember.js", Some("VERSION")),
        global("Backbone", "Backbone.js", Some("VERSION")),
        global("ko", "Knockout.js", Some("version")),
        global("Svelte", "Svelte", None),
        global("__NEXT_DATA__", "Next.js", None),
        global("__NUXT__", "Nuxt", None),
        global("__GATSBY", "Gatsby", None),
    ],
    attributes: &[
        attrs(&["ng-app", "ng-controller"], "AngularJS"),
        attrs(&["data-reactroot", "data-reactid"], "React"),
        attrs(&["data-vue", "data-v-app"], "Vue.js"),
        attrs(&["ng-version"], "Angular"),
        attrs(&["data-svelte-h"], "Svelte"),
        attrs(&["data-ember-action"], "Ember.js"),
    ],
    meta_generator: true,
    script_keywords: &[
        kw("react", "React"),
        kw("vue", "Vue.js"),
        kw("angular", "AngularJS"),
        kw("jquery", "jQuery"),
        kw("bootstrap", "Bootstrap"),
        kw("modernizr", "Modernizr"),
        kw("/_next/", "Next.js"),
        kw("/_nuxt/", "Nuxt"),
        kw("svelte", "Svelte"),
        kw("ember", "Ember.js"),
        kw("backbone", "Backbone.js"),
        kw("knockout", "Knockout.js"),
        kw("wp-content", "WordPress"),
        kw("wp-includes", "WordPress"),
    ],
};

/// Utility libraries
pub const LIBRARY_RULES: RuleSet = RuleSet {
    name: "libraries",
    globals: &[
        global("jQuery", "jQuery", Some("fn.jquery")),
        global("_", "Lodash", Some("VERSION")),
        global("moment", "Moment.js", Some("version")),
        global("axios", "Axios", Some("VERSION")),
        global("d3", "D3.js", Some("version")),
        global("Chart", "Chart.js", Some("version")),
        global("THREE", "Three.js", Some("REVISION")),
        global("gsap", "GSAP", Some("version")),
        global("DOMPurify", "DOMPurify", Some("version")),
        global("Handlebars", "Handlebars", Some("VERSION")),
        global("io", "Socket.IO", None),
        global("Alpine", "Alpine.js", Some("version")),
        global("htmx", "htmx", Some("version")),
    ],
    attributes: &[
        attrs(&["x-data", "x-init"], "Alpine.js"),
        attrs(&["hx-get", "hx-post", "hx-target"], "htmx"),
        attrs(&["data-bs-toggle"], "Bootstrap"),
    ],
    meta_generator: false,
    script_keywords: &[
        kw("jquery", "jQuery"),
        kw("lodash", "Lodash"),
        kw("underscore", "Underscore.js"),
        kw("moment", "Moment.js"),
        kw("axios", "Axios"),
        kw("d3js", "D3.js"),
        kw("/d3.", "D3.js"),
        kw("chart.js", "Chart.js"),
        kw("chart.min.js", "Chart.js"),
        kw("three", "Three.js"),
        kw("gsap", "GSAP"),
        kw("dompurify", "DOMPurify"),
        kw("purify.min.js", "DOMPurify"),
        kw("handlebars", "Handlebars"),
        kw("socket.io", "Socket.IO"),
        kw("alpine", "Alpine.js"),
        kw("htmx", "htmx"),
        kw("popper", "Popper"),
        kw("bootstrap", "Bootstrap"),
        kw("modernizr", "Modernizr"),
    ],
};

/// Technology label to documentation URL
pub const TECHNOLOGY_DOCS: &[(&str, &str)] = &[
    ("jQuery", "https://api.jquery.com/"),
    ("AngularJS", "https://docs.angularjs.org/guide"),
    ("Angular", "https://angular.dev/overview"),
    ("React", "https://react.dev/"),
    ("Vue.js", "https://vuejs.org/guide/introduction.html"),
    ("Ember.js", "https://guides.emberjs.com/"),
    ("Backbone.js", "https://backbonejs.org/"),
    ("Knockout.js", "https://knockoutjs.com/documentation/introduction.html"),
    ("Svelte", "https://svelte.dev/docs"),
    ("Next.js", "https://nextjs.org/docs"),
    ("Nuxt", "https://nuxt.com/docs"),
    ("Gatsby", "https://www.gatsbyjs.com/docs/"),
    ("WordPress", "https://wordpress.org/documentation/"),
    ("Bootstrap", "https://getbootstrap.com/docs/"),
    ("Modernizr", "https://modernizr.com/docs"),
    ("Lodash", "https://lodash.com/docs/"),
    ("Underscore.js", "https://underscorejs.org/"),
    ("Moment.js", "https://momentjs.com/docs/"),
    ("Axios", "https://axios-http.com/docs/intro"),
    ("D3.js", "https://d3js.org/"),
    ("Chart.js", "https://www.chartjs.org/docs/latest/"),
    ("Three.js", "https://threejs.org/docs/"),
    ("GSAP", "https://gsap.com/docs/v3/"),
    ("DOMPurify", "https://github.com/cure53/DOMPurify"),
    ("Handlebars", "https://handlebarsjs.com/guide/"),
    ("Socket.IO", "https://socket.io/docs/v4/"),
    ("Alpine.js", "https://alpinejs.dev/start-here"),
    ("htmx", "https://htmx.org/docs/"),
    ("Popper", "https://popper.js.org/docs/v2/"),
];

lazy_static! {
    static ref TECHNOLOGY_DOC_INDEX: HashMap<&'static str, &'static str> =
        TECHNOLOGY_DOCS.iter().copied().collect();
}

/// Documentation link for a technology label (exact match)
pub fn technology_doc(label: &str) -> Option<&'static str> {
    TECHNOLOGY_DOC_INDEX.get(label).copied()
}
