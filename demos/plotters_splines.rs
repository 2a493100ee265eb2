extern crate plotters;
use plotters::prelude::*;

extern crate strand;
use strand::{
    CubicHermiteSpline, NaturalSpline, Point, PointN, Spline, SplineInverter,
    UniformCubicBSpline,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cpoints = vec![
        (0f64, 1.77f64),
        (1.1f64, -1f64),
        (4.3f64, 3f64),
        (3.2f64, -4f64),
        (6.0f64, -1.5f64),
        (7.5f64, 2.5f64),
    ];
    let points: Vec<PointN<f64, 2>> = cpoints.iter().map(|&(x, y)| PointN::new([x, y])).collect();

    let bspline = UniformCubicBSpline::new(points.clone())?;
    let natural = NaturalSpline::with_alpha(points.clone(), 0.5)?;
    let centripetal = CubicHermiteSpline::with_alpha(points, 0.5)?;

    // render the paths of the curves to desired accuracy
    let nsteps: usize = 1000;
    let sample = |spline: &dyn Spline<PointN<f64, 2>>| -> Vec<(f64, f64)> {
        (0..=nsteps)
            .map(|i| {
                let p = spline.position(spline.max_t() * i as f64 / nsteps as f64);
                (p.axis(0), p.axis(1))
            })
            .collect()
    };

    // equidistant marks along the natural spline
    let inverter = SplineInverter::new(&natural)?;
    let marks: Vec<(f64, f64)> = inverter
        .partition(1.0)?
        .into_iter()
        .map(|t| {
            let p = natural.position(t);
            (p.axis(0), p.axis(1))
        })
        .collect();

    let root = BitMapBackend::new("splines.png", (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Splines (natural length {:.3})", natural.total_length()),
            ("sans-serif", 21).into_font(),
        )
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-1.0f64..9.0f64, -6.0f64..5.0f64)?;

    chart.configure_mesh().draw()?;

    chart
        .draw_series(PointSeries::of_element(
            cpoints.clone(),
            5,
            &BLACK,
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?
        .label("Control Points")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .draw_series(LineSeries::new(sample(&bspline), &BLUE))?
        .label("Uniform cubic B-spline")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(sample(&natural), &RED))?
        .label("Centripetal natural spline")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(sample(&centripetal), &GREEN))?
        .label("Centripetal Catmull-Rom")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart.draw_series(
        marks
            .into_iter()
            .map(|coord| Circle::new(coord, 3, RED.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
