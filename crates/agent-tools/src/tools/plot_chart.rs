use agent_core::ToolOutput;

use crate::chart::{ChartRenderer, ChartSpec};
use crate::declaration::{ParamSpec, ParamType, ToolDeclaration};

pub(crate) fn declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "plot_chart",
        description: "Draw a 2-D chart from x and y data.",
        parameters: vec![
            ParamSpec::required("title", ParamType::String, "The graph title"),
            ParamSpec::required("xlabel", ParamType::String, "The label of x axis"),
            ParamSpec::required("ylabel", ParamType::String, "The label of y axis"),
            ParamSpec::required("x", ParamType::Array, "x datas").of(ParamType::Number),
            ParamSpec::required("y", ParamType::Array, "y datas").of(ParamType::Number),
        ],
    }
}

/// The chart is shown to the user, not the model, so the output is always absent.
pub(crate) fn run(renderer: &dyn ChartRenderer, spec: &ChartSpec) -> ToolOutput {
    match renderer.render(spec) {
        Ok(path) => log::debug!("plot_chart rendered {}", path.display()),
        Err(e) => log::warn!("plot_chart({}): {}", spec.title, e),
    }
    ToolOutput::Absent
}
