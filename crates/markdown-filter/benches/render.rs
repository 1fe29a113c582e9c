#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_filter::{
  MarkdownFilterOptions,
  MarkdownRenderer,
  ViewEngineOptions,
  create_for_view_engine,
  create_standalone,
};

const MARKDOWN_SMALL: &str = "# Welcome\n\nThis is a **test** paragraph.\n";

const MARKDOWN_LARGE: &str = r"# Getting Started

If you can read this, chances are you can also use this *filter* properly.

## Prerequisites

- [x] A template
- [ ] Some Markdown
- [ ] Patience

| Option     | Default | Meaning                       |
| ---------- | ------- | ----------------------------- |
| `preset`   | advanced | Which extensions start out on |
| `allow_html` | true  | Pass raw HTML through          |

Term
: Definition of the term, with a footnote.[^1]

~~Deprecated~~ text, x^2^ and <https://example.com>.

```toml
preset = 'commonmark'
```

[^1]: The footnote.
";

fn bench_renderer(c: &mut Criterion) {
  let mut group = c.benchmark_group("renderer");

  let advanced = MarkdownRenderer::new(&MarkdownFilterOptions::default())
    .expect("default options should build");
  let commonmark = MarkdownRenderer::new(&MarkdownFilterOptions::commonmark())
    .expect("commonmark options should build");

  for (size, markdown) in [("small", MARKDOWN_SMALL), ("large", MARKDOWN_LARGE)]
  {
    group.bench_with_input(
      BenchmarkId::new("advanced", size),
      &markdown,
      |b, markdown| {
        b.iter(|| advanced.render(black_box(markdown)));
      },
    );

    group.bench_with_input(
      BenchmarkId::new("commonmark", size),
      &markdown,
      |b, markdown| {
        b.iter(|| commonmark.render(black_box(markdown)));
      },
    );
  }

  group.finish();
}

fn bench_template_filter(c: &mut Criterion) {
  let mut group = c.benchmark_group("template_filter");

  let (_filter, standalone) = create_standalone(None).unwrap();
  let standalone_env = standalone.environment();

  let mut view = ViewEngineOptions::new();
  create_for_view_engine(&mut view, None).unwrap();
  let view_env = view.template_options.environment();

  let template = "{{ body | markdown }}";

  group.bench_function("standalone", |b| {
    b.iter(|| {
      standalone_env
        .render_str(
          black_box(template),
          minijinja::context! { body => MARKDOWN_LARGE },
        )
        .unwrap()
    });
  });

  group.bench_function("view", |b| {
    b.iter(|| {
      view_env
        .render_str(
          black_box(template),
          minijinja::context! { body => MARKDOWN_LARGE },
        )
        .unwrap()
    });
  });

  group.finish();
}

criterion_group!(benches, bench_renderer, bench_template_filter);
criterion_main!(benches);
