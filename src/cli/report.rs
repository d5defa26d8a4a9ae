//! Report rendering
//!
//! Every report comes in four shapes: the fixed-width plain text the
//! inventory tool has always printed, a boxed table, JSON and CSV.

use console::style;
use serde::Serialize;
use std::io::{self, Write};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;
use crate::core::catalog::Catalog;
use crate::core::entity::Item;
use crate::core::identity::ItemId;
use crate::core::quantities::{DemandList, Quantity, QuantityLine};
use crate::core::resolver::{Activity, Resolution};
use crate::entities::Assembly;

const HELP: &str = "\
Requests:
    addPart
    addAssembly ID capacity [x1 n1 [x2 n2 ...]]
    fulfillOrder [x1 n1 [x2 n2 ...]]
    stock ID n
    restock [ID]
    empty ID
    inventory [ID]
    parts
    help
    clear
    quit
";

#[derive(Serialize)]
struct ProductionDoc<'a> {
    activity: &'a [Activity],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parts_needed: Vec<&'a QuantityLine>,
}

#[derive(Serialize)]
struct AssemblyRow<'a> {
    id: &'a ItemId,
    capacity: Quantity,
    on_hand: Quantity,
    low: bool,
}

impl<'a> From<&'a Assembly> for AssemblyRow<'a> {
    fn from(asm: &'a Assembly) -> Self {
        Self {
            id: asm.id(),
            capacity: asm.capacity(),
            on_hand: asm.on_hand(),
            low: asm.is_low(),
        }
    }
}

#[derive(Serialize)]
struct AssemblyDoc<'a> {
    #[serde(flatten)]
    summary: AssemblyRow<'a>,
    recipe: Vec<&'a QuantityLine>,
}

#[derive(Serialize)]
struct RecipeCsvRow<'a> {
    assembly_id: &'a ItemId,
    capacity: Quantity,
    on_hand: Quantity,
    component_id: Option<&'a ItemId>,
    quantity: Option<Quantity>,
}

impl<'a> RecipeCsvRow<'a> {
    fn new(asm: &'a Assembly, line: Option<&'a QuantityLine>) -> Self {
        Self {
            assembly_id: asm.id(),
            capacity: asm.capacity(),
            on_hand: asm.on_hand(),
            component_id: line.map(|l| &l.id),
            quantity: line.map(|l| l.quantity),
        }
    }
}

#[derive(Serialize)]
struct PartRow<'a> {
    id: &'a ItemId,
}

/// Renders reports in the configured format
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Production log followed by the raw parts needed
    pub fn production<W: Write>(&self, out: &mut W, resolution: &Resolution) -> io::Result<()> {
        match self.format {
            OutputFormat::Plain | OutputFormat::Table => {
                for activity in &resolution.activity {
                    writeln!(out, "{}", activity_line(activity))?;
                }
                self.demand(out, &resolution.demand)
            }
            OutputFormat::Json => {
                if resolution.is_empty() {
                    return Ok(());
                }
                json(
                    out,
                    &ProductionDoc {
                        activity: &resolution.activity,
                        parts_needed: resolution.demand.sorted(),
                    },
                )
            }
            OutputFormat::Csv => self.demand(out, &resolution.demand),
        }
    }

    /// Raw parts needed, sorted by part id; nothing when empty
    pub fn demand<W: Write>(&self, out: &mut W, demand: &DemandList) -> io::Result<()> {
        if demand.is_empty() {
            return Ok(());
        }
        let lines = demand.sorted();
        match self.format {
            OutputFormat::Plain => {
                writeln!(out, "Parts needed:")?;
                writeln!(out, "-------------")?;
                writeln!(out, "Part ID     quantity")?;
                writeln!(out, "=========== ========")?;
                for line in lines {
                    writeln!(out, "{:<11} {:>8}", line.id, line.quantity)?;
                }
                Ok(())
            }
            OutputFormat::Table => table(
                out,
                "Parts needed",
                ["Part ID", "Quantity"],
                lines
                    .iter()
                    .map(|l| vec![l.id.to_string(), l.quantity.to_string()]),
            ),
            OutputFormat::Json => json(out, &lines),
            OutputFormat::Csv => csv_rows(out, lines),
        }
    }

    /// Every assembly, sorted by id, flagging low bins
    pub fn inventory<W: Write>(&self, out: &mut W, catalog: &Catalog) -> io::Result<()> {
        let assemblies = catalog.assemblies_sorted();
        match self.format {
            OutputFormat::Plain => {
                writeln!(out, "Assembly inventory:")?;
                writeln!(out, "-------------------")?;
                if assemblies.is_empty() {
                    return writeln!(out, "EMPTY INVENTORY");
                }
                writeln!(out, "Assembly ID Capacity On Hand")?;
                writeln!(out, "=========== ======== =======")?;
                for asm in assemblies {
                    writeln!(
                        out,
                        "{:<11} {:>8} {:>7}{}",
                        asm.id(),
                        asm.capacity(),
                        asm.on_hand(),
                        if asm.is_low() { "*" } else { "" }
                    )?;
                }
                Ok(())
            }
            OutputFormat::Table => {
                if assemblies.is_empty() {
                    writeln!(out, "{}", style("Assembly inventory").bold())?;
                    return writeln!(out, "{}", style("EMPTY INVENTORY").dim());
                }
                table(
                    out,
                    "Assembly inventory",
                    ["Assembly ID", "Capacity", "On Hand", "Low"],
                    assemblies.iter().map(|asm| {
                        vec![
                            asm.id().to_string(),
                            asm.capacity().to_string(),
                            asm.on_hand().to_string(),
                            if asm.is_low() { "*" } else { "" }.to_string(),
                        ]
                    }),
                )
            }
            OutputFormat::Json => {
                let rows: Vec<AssemblyRow> = assemblies.into_iter().map(AssemblyRow::from).collect();
                json(out, &rows)
            }
            OutputFormat::Csv => csv_rows(out, assemblies.into_iter().map(AssemblyRow::from)),
        }
    }

    /// One assembly's bin and its recipe sorted by component id
    pub fn assembly<W: Write>(&self, out: &mut W, asm: &Assembly) -> io::Result<()> {
        let recipe = asm.recipe().sorted();
        match self.format {
            OutputFormat::Plain => {
                writeln!(out, "Assembly ID:  {}", asm.id())?;
                writeln!(out, "bin capacity: {}", asm.capacity())?;
                writeln!(out, "on-hand:      {}", asm.on_hand())?;
                if recipe.is_empty() {
                    return Ok(());
                }
                writeln!(out, "Parts list:")?;
                writeln!(out, "-----------")?;
                writeln!(out, "Part ID     quantity")?;
                writeln!(out, "=========== ========")?;
                for line in recipe {
                    writeln!(out, "{:<15} {:>4}", line.id, line.quantity)?;
                }
                Ok(())
            }
            OutputFormat::Table => {
                table(
                    out,
                    &format!("Assembly {}", asm.id()),
                    ["Bin capacity", "On Hand"],
                    std::iter::once(vec![asm.capacity().to_string(), asm.on_hand().to_string()]),
                )?;
                if recipe.is_empty() {
                    return Ok(());
                }
                table(
                    out,
                    "Parts list",
                    ["Part ID", "Quantity"],
                    recipe
                        .iter()
                        .map(|l| vec![l.id.to_string(), l.quantity.to_string()]),
                )
            }
            OutputFormat::Json => json(
                out,
                &AssemblyDoc {
                    summary: AssemblyRow::from(asm),
                    recipe,
                },
            ),
            OutputFormat::Csv => {
                if recipe.is_empty() {
                    csv_rows(out, [RecipeCsvRow::new(asm, None)])
                } else {
                    csv_rows(out, recipe.iter().map(|l| RecipeCsvRow::new(asm, Some(*l))))
                }
            }
        }
    }

    /// Every part, sorted by id
    pub fn parts<W: Write>(&self, out: &mut W, catalog: &Catalog) -> io::Result<()> {
        let parts = catalog.parts_sorted();
        match self.format {
            OutputFormat::Plain => {
                writeln!(out, "Part inventory:")?;
                writeln!(out, "---------------")?;
                if parts.is_empty() {
                    return writeln!(out, "NO PARTS");
                }
                writeln!(out, "Part ID")?;
                writeln!(out, "===========")?;
                for part in parts {
                    writeln!(out, "{}", part.id)?;
                }
                Ok(())
            }
            OutputFormat::Table => {
                if parts.is_empty() {
                    writeln!(out, "{}", style("Part inventory").bold())?;
                    return writeln!(out, "{}", style("NO PARTS").dim());
                }
                table(
                    out,
                    "Part inventory",
                    ["Part ID"],
                    parts.iter().map(|p| vec![p.id.to_string()]),
                )
            }
            OutputFormat::Json => {
                let ids: Vec<&ItemId> = parts.iter().map(|p| &p.id).collect();
                json(out, &ids)
            }
            OutputFormat::Csv => csv_rows(out, parts.iter().map(|p| PartRow { id: &p.id })),
        }
    }

    /// The request summary; always plain text
    pub fn help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(HELP.as_bytes())
    }
}

fn activity_line(activity: &Activity) -> String {
    match activity {
        Activity::Make { id, units } => format!(">>> make {} units of assembly {}", units, id),
        Activity::Restock { id, units } => {
            format!(">>> restocking assembly {} with {} items", id, units)
        }
    }
}

fn table<W, R, const N: usize>(out: &mut W, title: &str, header: [&str; N], rows: R) -> io::Result<()>
where
    W: Write,
    R: IntoIterator<Item = Vec<String>>,
{
    writeln!(out, "{}", style(title).bold())?;
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    writeln!(out, "{}", builder.build().with(Style::rounded()))
}

fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn csv_rows<W, T, I>(out: &mut W, rows: I) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(&mut *out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()
}
