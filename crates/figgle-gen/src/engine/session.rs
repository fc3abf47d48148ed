//! The generation session
//!
//! A session is the whole lifecycle of one run. While it is alive it is
//! Collecting: the host calls [`GenerationSession::visit`] once per
//! declaration node. [`GenerationSession::finalize`] consumes it and emits,
//! so nothing can be registered after emission starts.
//!
//! Member names are claimed during Collecting, fonts are only looked up
//! during Emitting. An item whose font turns out to be unknown therefore
//! still occupies its name.

use crate::build::{GeneratedFragment, GenerationOutput};
use crate::codegen::{FragmentGenerator, RenderedMember};
use crate::config::{DiagnosticOrder, GeneratorConfig};
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, FiggleError, FiggleResult};
use crate::engine::accumulator::{Registration, TypeAccumulator};
use crate::engine::identifier::is_valid_identifier;
use crate::engine::recognizer::{recognize, Recognition};
use crate::host::SymbolResolver;
use crate::ir::{AnnotationRequest, TypeDeclaration};
use crate::render::FontRenderer;
use tracing::{debug, info, trace, warn};

/// One run of the generator
#[derive(Debug, Default)]
pub struct GenerationSession {
    config: GeneratorConfig,
    accumulator: TypeAccumulator,
    diagnostics: DiagnosticsCollector,
    visited: usize,
}

impl GenerationSession {
    /// Start a session in the Collecting phase
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            accumulator: TypeAccumulator::new(),
            diagnostics: DiagnosticsCollector::new(),
            visited: 0,
        }
    }

    /// Process one declaration node
    ///
    /// Returns an error only when the resolver cannot resolve a node that
    /// carries the marker; the run must then be aborted. Every problem with
    /// the annotations themselves becomes a diagnostic.
    pub fn visit<R>(&mut self, node: &TypeDeclaration, resolver: &R) -> FiggleResult<()>
    where
        R: SymbolResolver + ?Sized,
    {
        self.visited += 1;
        trace!(node = %node.id, name = %node.name, "figgle.visit");

        let markers: Vec<_> = node
            .attributes
            .iter()
            .filter_map(|attr| match recognize(attr) {
                Recognition::Recognized(args) => Some((attr, args)),
                Recognition::NotRecognized => None,
                Recognition::MalformedArgs(reason) => {
                    debug!(name = %node.name, location = %attr.span, %reason, "figgle.marker.malformed");
                    None
                }
            })
            .collect();

        if markers.is_empty() {
            return Ok(());
        }

        let mut resolved = resolver.resolve_merged_type(node).map_err(|source| {
            warn!(node = %node.id, name = %node.name, error = %source, "figgle.resolve.failed");
            FiggleError::Resolution {
                node: node.id,
                name: node.name.clone(),
                source,
            }
        })?;
        resolved.key = resolved.key.normalized();

        for (attr, args) in markers {
            if resolved.is_nested() {
                self.diagnostics
                    .report(Diagnostic::nested_type_unsupported(attr.span.clone(), &node.name));
                continue;
            }
            if !node.partial {
                self.diagnostics
                    .report(Diagnostic::type_not_mergeable(attr.span.clone(), &node.name));
                continue;
            }
            if !is_valid_identifier(args.member_name.value) {
                self.diagnostics.report(Diagnostic::invalid_member_name(
                    args.member_name.span.clone(),
                    args.member_name.value,
                ));
                continue;
            }

            let entry = self
                .accumulator
                .entry_or_seed(&resolved.key, node.kind, || resolver.existing_members(&resolved.key));

            let request = AnnotationRequest {
                member_name: args.member_name.value.to_string(),
                member_name_location: args.member_name.span.clone(),
                font_name: args.font_name.value.to_string(),
                font_name_location: args.font_name.span.clone(),
                source_text: args.source_text.value.to_string(),
                location: attr.span.clone(),
            };

            match entry.accept(request) {
                Registration::Accepted => {
                    debug!(merged_type = %resolved.key, member = args.member_name.value, "figgle.member.accepted");
                }
                Registration::Duplicate => {
                    self.diagnostics.report(Diagnostic::duplicate_member_name(
                        args.member_name.span.clone(),
                        args.member_name.value,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Accumulated state, read-only
    pub fn accumulator(&self) -> &TypeAccumulator {
        &self.accumulator
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }

    /// Number of nodes visited
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// End Collecting and emit one fragment per merged type
    ///
    /// Items are rendered in source order. Unknown fonts are reported here,
    /// after every extraction diagnostic.
    pub fn finalize<F>(self, renderer: &F) -> GenerationOutput
    where
        F: FontRenderer + ?Sized,
    {
        let Self {
            config,
            accumulator,
            mut diagnostics,
            visited,
        } = self;

        let generator = FragmentGenerator::new(&config.emit);
        let mut fragments = Vec::with_capacity(accumulator.len());

        for (key, entry) in accumulator.into_entries() {
            let mut items: Vec<&AnnotationRequest> = entry.items().iter().collect();
            items.sort_by(|a, b| a.location.cmp(&b.location));

            let mut members = Vec::with_capacity(items.len());
            for item in items {
                match renderer.render(&item.font_name, &item.source_text) {
                    Some(value) => members.push(RenderedMember {
                        name: item.member_name.clone(),
                        value,
                    }),
                    None => diagnostics.report(Diagnostic::unknown_font(
                        item.font_name_location.clone(),
                        &item.font_name,
                    )),
                }
            }

            let source = generator.generate(&key, entry.kind(), &members);
            fragments.push(GeneratedFragment {
                hint_name: generator.hint_name(&key),
                key,
                members,
                source,
            });
        }

        let diagnostics = match config.diagnostics.order {
            DiagnosticOrder::Discovery => diagnostics.into_diagnostics(),
            DiagnosticOrder::Location => diagnostics.into_sorted_by_location(),
        };

        info!(
            visited,
            fragments = fragments.len(),
            diagnostics = diagnostics.len(),
            "figgle.finalize"
        );

        GenerationOutput {
            fragments,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::host::{ResolutionFailure, ResolvedType};
    use crate::ir::{Attribute, MergedTypeKey, NodeId, SourceSpan, TypeKind};
    use crate::render::FontRegistry;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::collections::BTreeSet;

    /// Resolver double: every node resolves to one fixed type
    struct FixedResolver {
        resolved: ResolvedType,
        members: BTreeSet<String>,
        member_lookups: Cell<usize>,
    }

    impl FixedResolver {
        fn top_level(key: MergedTypeKey, members: &[&str]) -> Self {
            Self {
                resolved: ResolvedType::top_level(key),
                members: members.iter().map(|m| m.to_string()).collect(),
                member_lookups: Cell::new(0),
            }
        }
    }

    impl SymbolResolver for FixedResolver {
        fn resolve_merged_type(&self, _node: &TypeDeclaration) -> Result<ResolvedType, ResolutionFailure> {
            Ok(self.resolved.clone())
        }

        fn existing_members(&self, _key: &MergedTypeKey) -> BTreeSet<String> {
            self.member_lookups.set(self.member_lookups.get() + 1);
            self.members.clone()
        }
    }

    struct FailingResolver;

    impl SymbolResolver for FailingResolver {
        fn resolve_merged_type(&self, _node: &TypeDeclaration) -> Result<ResolvedType, ResolutionFailure> {
            Err(ResolutionFailure::Host("semantic model unavailable".to_string()))
        }

        fn existing_members(&self, _key: &MergedTypeKey) -> BTreeSet<String> {
            BTreeSet::new()
        }
    }

    fn span(line: usize) -> SourceSpan {
        SourceSpan::new("Demo.cs", line * 100, line * 100 + 10, line, 1)
    }

    fn marker(member: &str, font: &str, text: &str, line: usize) -> Attribute {
        let mut attr = Attribute::figgle_text(member, font, text).at(span(line));
        for (i, arg) in attr.arguments.iter_mut().enumerate() {
            arg.span = SourceSpan::new("Demo.cs", line * 100 + 20 * (i + 1), line * 100 + 20 * (i + 1) + 5, line, 20 * (i + 1));
        }
        attr
    }

    fn demo_key() -> MergedTypeKey {
        MergedTypeKey::in_namespace("Demo", "DemoUsage")
    }

    fn demo_decl() -> TypeDeclaration {
        TypeDeclaration::class("DemoUsage").in_namespace("Demo").partial().with_id(NodeId(1))
    }

    fn fonts() -> FontRegistry {
        FontRegistry::new().with_font("stacey", |t: &str| format!("<{}>", t))
    }

    #[test]
    fn test_seed_lookup_happens_once_per_key() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();

        session
            .visit(&demo_decl().annotate(marker("A", "stacey", "a", 1)), &resolver)
            .unwrap();
        session
            .visit(&demo_decl().annotate(marker("B", "stacey", "b", 2)), &resolver)
            .unwrap();

        assert_eq!(resolver.member_lookups.get(), 1);
        assert_eq!(session.accumulator().get(&demo_key()).unwrap().items().len(), 2);
    }

    #[test]
    fn test_unannotated_node_is_not_resolved() {
        let mut session = GenerationSession::default();
        let decl = demo_decl().annotate(Attribute::new("Serializable"));

        assert!(session.visit(&decl, &FailingResolver).is_ok());
        assert_eq!(session.visited(), 1);
        assert!(session.accumulator().is_empty());
    }

    #[test]
    fn test_resolution_failure_is_fatal() {
        let mut session = GenerationSession::default();
        let decl = demo_decl().annotate(marker("A", "stacey", "a", 1));

        let err = session.visit(&decl, &FailingResolver).unwrap_err();
        assert!(matches!(err, FiggleError::Resolution { node: NodeId(1), .. }));
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_malformed_marker_is_ignored() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();
        let decl = demo_decl().annotate(Attribute::new("GenerateFiggleText"));

        session.visit(&decl, &resolver).unwrap();
        let output = session.finalize(&fonts());

        assert!(output.fragments.is_empty());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_check_order_nested_before_partial() {
        let key = MergedTypeKey::in_namespace("Demo", "Inner");
        let resolver = FixedResolver {
            resolved: ResolvedType::nested(key, demo_key()),
            members: BTreeSet::new(),
            member_lookups: Cell::new(0),
        };
        let mut session = GenerationSession::default();
        let decl = TypeDeclaration::class("Inner")
            .with_id(NodeId(2))
            .annotate(marker("1bad", "stacey", "x", 1));

        session.visit(&decl, &resolver).unwrap();

        let kinds: Vec<_> = session.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::NestedTypeUnsupported]);
        assert_eq!(session.diagnostics()[0].location, span(1));
        assert_eq!(resolver.member_lookups.get(), 0);
    }

    #[test]
    fn test_check_order_partial_before_identifier() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();
        let decl = TypeDeclaration::class("DemoUsage")
            .in_namespace("Demo")
            .with_id(NodeId(1))
            .annotate(marker("1bad", "stacey", "x", 1));

        session.visit(&decl, &resolver).unwrap();

        assert_eq!(session.diagnostics()[0].kind, DiagnosticKind::TypeNotMergeable);
        assert_eq!(session.diagnostics()[0].arguments, ["DemoUsage"]);
        assert!(session.accumulator().is_empty());
    }

    #[test]
    fn test_invalid_name_reported_at_argument() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();
        let attr = marker("not valid", "nope", "x", 3);
        let name_span = attr.arguments[0].span.clone();

        session.visit(&demo_decl().annotate(attr), &resolver).unwrap();
        let output = session.finalize(&fonts());

        // The font is never looked up for an invalid name.
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::InvalidMemberName);
        assert_eq!(output.diagnostics[0].location, name_span);
        assert!(output.fragments.is_empty());
    }

    #[test]
    fn test_unknown_font_keeps_name_slot() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();
        let first = marker("Foo", "missing", "x", 1);
        let font_span = first.arguments[1].span.clone();
        let decl = demo_decl()
            .annotate(first)
            .annotate(marker("Foo", "stacey", "y", 2));

        session.visit(&decl, &resolver).unwrap();
        let output = session.finalize(&fonts());

        let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::DuplicateMemberName, DiagnosticKind::UnknownFont]);
        assert_eq!(output.diagnostics[1].location, font_span);
        assert_eq!(output.diagnostics[1].arguments, ["missing"]);

        let fragment = output.fragment(&demo_key()).unwrap();
        assert!(fragment.members.is_empty());
    }

    #[test]
    fn test_items_emitted_in_source_order() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();

        // Visited out of source order.
        session.visit(&demo_decl().annotate(marker("B", "stacey", "b", 9)), &resolver).unwrap();
        session.visit(&demo_decl().annotate(marker("A", "stacey", "a", 2)), &resolver).unwrap();
        let output = session.finalize(&fonts());

        let names: Vec<_> = output.fragments[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_location_order_option() {
        let resolver = FixedResolver::top_level(demo_key(), &["Taken"]);
        let mut config = GeneratorConfig::default();
        config.diagnostics.order = DiagnosticOrder::Location;
        let mut session = GenerationSession::new(config);

        session.visit(&demo_decl().annotate(marker("Taken", "stacey", "x", 5)), &resolver).unwrap();
        session.visit(&demo_decl().annotate(marker("Ok", "missing", "x", 1)), &resolver).unwrap();
        let output = session.finalize(&fonts());

        let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::UnknownFont, DiagnosticKind::DuplicateMemberName]);
    }

    #[test]
    fn test_fragment_uses_first_site_kind() {
        let resolver = FixedResolver::top_level(demo_key(), &[]);
        let mut session = GenerationSession::default();
        let decl = TypeDeclaration::new(TypeKind::Record, "DemoUsage")
            .in_namespace("Demo")
            .partial()
            .with_id(NodeId(1))
            .annotate(marker("A", "stacey", "a", 1));

        session.visit(&decl, &resolver).unwrap();
        let output = session.finalize(&fonts());

        assert!(output.fragments[0].source.contains("partial record DemoUsage"));
    }

    #[test]
    fn test_blank_resolver_namespace_joins_global_type() {
        let raw = MergedTypeKey {
            name: "Banner".to_string(),
            namespace: Some(String::new()),
        };
        let blank = FixedResolver::top_level(raw, &[]);
        let global = FixedResolver::top_level(MergedTypeKey::global("Banner"), &[]);
        let decl = TypeDeclaration::class("Banner").partial().with_id(NodeId(1));
        let mut session = GenerationSession::default();

        session.visit(&decl.clone().annotate(marker("Foo", "stacey", "a", 1)), &blank).unwrap();
        session.visit(&decl.annotate(marker("Foo", "stacey", "b", 2)), &global).unwrap();
        let output = session.finalize(&fonts());

        assert_eq!(output.fragments.len(), 1);
        assert_eq!(output.fragments[0].hint_name, "Banner.FiggleText.g.cs");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::DuplicateMemberName);
    }
}
