//! Horizon Multitype Feed Demo
//!
//! Drives a model with two kinds of rows and a "load more" footer, and renders
//! it to the console after every change, the way a list widget would:
//! - rows are created through the registered factories and bound by position
//! - the footer stays last while more items are appended
//! - removals report precise ranges
//!
//! Run with: cargo run -p horizon-multitype --example demo_feed
//! Set RUST_LOG=horizon_multitype=trace to see the model's own events.

use std::sync::Arc;

use horizon_multitype::{
    ContainerFactory, ItemBinder, ItemContainer, ItemSource, ModelChange, MultiTypeModelBuilder,
    TypeTag, ViewLifecycle,
};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Kinds of row shown in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoType {
    Post,
    Advert,
    Footer,
}

impl From<DemoType> for TypeTag {
    fn from(kind: DemoType) -> Self {
        TypeTag::new(kind as u32)
    }
}

/// The console "list widget" rows are created in.
struct Console {
    width: usize,
}

/// One rendered console line.
#[derive(Default)]
struct Line {
    width: usize,
    text: String,
    on_screen: bool,
}

impl ViewLifecycle for Line {
    fn on_attached(&mut self) {
        self.on_screen = true;
    }

    fn on_detached(&mut self) {
        self.on_screen = false;
    }
}

impl ItemContainer for Line {
    fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle> {
        Some(self)
    }
}

struct LineFactory(DemoType);

impl ContainerFactory<Console> for LineFactory {
    type Container = Line;

    fn type_tag(&self) -> TypeTag {
        self.0.into()
    }

    fn create(&self, console: &Console) -> Line {
        Line {
            width: console.width,
            ..Line::default()
        }
    }
}

struct Post {
    author: &'static str,
    body: &'static str,
}

impl ItemBinder for Post {
    type Container = Line;

    fn type_tag(&self) -> TypeTag {
        DemoType::Post.into()
    }

    fn bind(&self, line: &mut Line) {
        line.text = format!("{}: {}", self.author, self.body);
    }
}

struct Advert(&'static str);

impl ItemBinder for Advert {
    type Container = Line;

    fn type_tag(&self) -> TypeTag {
        DemoType::Advert.into()
    }

    fn bind(&self, line: &mut Line) {
        line.text = format!("[ad] {}", self.0);
    }
}

struct LoadMore;

impl ItemBinder for LoadMore {
    type Container = Line;

    fn type_tag(&self) -> TypeTag {
        DemoType::Footer.into()
    }

    fn bind(&self, line: &mut Line) {
        line.text = "... load more ...".to_string();
    }
}

/// Render every row of `source` the way a list widget would.
fn render(source: &dyn ItemSource<Console>, console: &Console) -> horizon_multitype::Result<()> {
    for position in 0..source.item_count()? {
        let tag = source.item_type_tag(position)?;
        let mut handle = source.create_container(tag, console)?;
        source.bind(position, &mut handle)?;
        source.container_attached(&mut handle)?;

        if let Some(line) = handle.downcast_ref::<Line>() {
            let text: String = line.text.chars().take(line.width).collect();
            let marker = if line.on_screen { '|' } else { ' ' };
            println!("  {position:>2} {marker} {text}");
        }
        source.container_detached(&mut handle)?;
    }
    println!();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let console = Console { width: 48 };
    let mut model = MultiTypeModelBuilder::<Console>::new()
        .factory(LineFactory(DemoType::Post))
        .factory(LineFactory(DemoType::Advert))
        .factory(LineFactory(DemoType::Footer))
        .require_lifecycle(true)
        .build();

    let pending = Arc::new(Mutex::new(Vec::new()));
    let recv = pending.clone();
    model
        .signals()
        .changed
        .connect(move |change: &ModelChange| recv.lock().push(*change));

    let step = |label: &str, model: &dyn ItemSource<Console>| {
        let changes: Vec<ModelChange> = std::mem::take(&mut *pending.lock());
        println!("{label}: {changes:?}");
        render(model, &console)
    };

    model.add_all([
        Post {
            author: "ana",
            body: "first light over the harbour",
        },
        Post {
            author: "ben",
            body: "new release is out",
        },
    ])?;
    model.set_footer(LoadMore)?;
    step("initial page", &model)?;

    model.add(Advert("try the premium plan"))?;
    model.add(Post {
        author: "cy",
        body: "anyone up for a walk?",
    })?;
    step("next page", &model)?;

    let removed = model.remove_all_of(DemoType::Advert.into())?;
    tracing::info!(removed, "adverts hidden");
    step("adverts hidden", &model)?;

    model.clear_footer()?;
    step("end of feed", &model)?;

    Ok(())
}
