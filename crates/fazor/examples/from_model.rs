//! Example: Creating a diagram from the model types
//!
//! This example demonstrates how to programmatically build a phasor
//! diagram using the model types directly, without going through the
//! declarative JSON input.

use fazor::{
    Diagram,
    color::Color,
    model::{AngleLink, Group, GroupItem},
};

fn entry(magnitude: f32, angle: f32, label: &str, color: &str) -> GroupItem {
    GroupItem::Entry(magnitude, angle, label.to_string(), color.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building RL series circuit diagram...\n");

    // Voltages: resistor drop, inductor drop, and the total as resultant
    let voltages = vec![
        entry(3.0, 0.0, "U_R", "green"),
        entry(4.0, 90.0, "U_L", "blue"),
        entry(5.0, 53.13, "U", "pink"),
        GroupItem::Unit("V".to_string()),
    ];

    // Current: a single phasor along the real axis
    let current = vec![
        entry(0.53, 0.0, "I", "red"),
        GroupItem::Unit("A".to_string()),
    ];

    let groups = Group::from_list(&[voltages, current])?;

    // Mark the phase angle between total voltage and current
    let links = vec![AngleLink::new(0, 1, Color::new("gray")?)];

    let diagram = Diagram::new(groups, "RL series circuit").with_angle_links(links)?;

    let figure = diagram.render()?;
    println!(
        "Rendered figure: bounds {:?}, {} bytes of SVG",
        figure.bounds(),
        figure.svg().len()
    );

    diagram.export_file("rl_circuit.svg", "svg")?;
    diagram.export_file("rl_circuit.png", "png")?;
    println!("Wrote rl_circuit.svg and rl_circuit.png");

    Ok(())
}
