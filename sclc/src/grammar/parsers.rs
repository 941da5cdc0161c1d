// Copyright (c) 2022, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use bp3d_scl::{Context, DirectiveError, Flow, Value};
use log::trace;

use crate::grammar::summary::Summary;
use crate::grammar::{CTX_SUMMARY, CAMERA, MATERIAL, NODE, PASS, SAMPLER, SCENE, TEXTURE};

fn summary(ctx: &mut Context) -> Result<&mut Summary, DirectiveError>
{
    ctx.user_context_mut(CTX_SUMMARY)
        .and_then(|v| v.downcast_mut::<Summary>())
        .ok_or_else(|| DirectiveError::new("no summary context registered"))
}

fn name_param(params: &[Value], what: &str) -> Result<String, DirectiveError>
{
    params
        .first()
        .and_then(Value::name)
        .map(str::to_owned)
        .ok_or_else(|| DirectiveError::new(format!("expected a {} name", what)))
}

pub fn root_scene(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    let name = name_param(params, "scene")?;
    summary(ctx)?.scenes.push(name);
    Ok(Flow::Enter(SCENE))
}

pub fn root_material(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    let name = name_param(params, "material")?;
    let summary = summary(ctx)?;
    summary.materials.push(name.clone());
    summary.current_material = Some(name);
    Ok(Flow::Enter(MATERIAL))
}

pub fn root_sampler(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    let name = name_param(params, "sampler")?;
    summary(ctx)?.samplers.push(name);
    Ok(Flow::Enter(SAMPLER))
}

pub fn root_font(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    let name = name_param(params, "font")?;
    let path = params
        .get(1)
        .and_then(Value::path)
        .ok_or("expected a font file path")?;
    let height = params.get(2).and_then(Value::uint32).ok_or("expected a font height")?;
    trace!("font [{}] from [{}] at {}px", name, path.display(), height);
    summary(ctx)?.fonts.push(name);
    Ok(Flow::Continue)
}

pub fn scene_ambient_light(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::colour).ok_or("expected a colour")?;
    Ok(Flow::Continue)
}

pub fn scene_background_colour(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::colour).ok_or("expected a colour")?;
    Ok(Flow::Continue)
}

pub fn scene_background_image(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::path).ok_or("expected an image path")?;
    Ok(Flow::Continue)
}

pub fn scene_fog_type(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::checked).ok_or("expected a fog type")?;
    Ok(Flow::Continue)
}

pub fn scene_fog_density(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected a density")?;
    Ok(Flow::Continue)
}

pub fn scene_scene_node(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    name_param(params, "node")?;
    summary(ctx)?.nodes += 1;
    Ok(Flow::Enter(NODE))
}

pub fn scene_camera(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    name_param(params, "camera")?;
    summary(ctx)?.cameras += 1;
    Ok(Flow::Enter(CAMERA))
}

pub fn node_position(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::point3f).ok_or("expected 3 floats")?;
    Ok(Flow::Continue)
}

pub fn node_scale(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::point3f).ok_or("expected 3 floats")?;
    Ok(Flow::Continue)
}

pub fn node_orientation(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::point4f).ok_or("expected an axis and an angle")?;
    Ok(Flow::Continue)
}

pub fn node_parent(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    name_param(params, "parent node")?;
    Ok(Flow::Continue)
}

pub fn camera_parent(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    name_param(params, "parent node")?;
    Ok(Flow::Continue)
}

pub fn camera_viewport(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::size).ok_or("expected a viewport size")?;
    Ok(Flow::Continue)
}

pub fn camera_fov_y(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected an angle")?;
    Ok(Flow::Continue)
}

pub fn camera_near(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected a distance")?;
    Ok(Flow::Continue)
}

pub fn camera_far(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected a distance")?;
    Ok(Flow::Continue)
}

pub fn material_pass(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
{
    summary(ctx)?.passes += 1;
    Ok(Flow::Enter(PASS))
}

pub fn material_end(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
{
    let summary = summary(ctx)?;
    if let Some(name) = summary.current_material.take() {
        trace!("finished material [{}]", name);
    }
    Ok(Flow::Continue)
}

pub fn pass_colour(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::colour).ok_or("expected a colour")?;
    Ok(Flow::Continue)
}

pub fn pass_shininess(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected an exponent")?;
    Ok(Flow::Continue)
}

pub fn pass_alpha(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected an opacity")?;
    Ok(Flow::Continue)
}

pub fn pass_two_sided(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::bool).ok_or("expected a boolean")?;
    Ok(Flow::Continue)
}

pub fn pass_blend_func(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::checked).ok_or("expected a source factor")?;
    params.get(1).and_then(Value::checked).ok_or("expected a destination factor")?;
    Ok(Flow::Continue)
}

pub fn pass_write_mask(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::bitfield32).ok_or("expected channel names")?;
    Ok(Flow::Continue)
}

pub fn pass_texture_unit(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
{
    summary(ctx)?.texture_units += 1;
    Ok(Flow::Enter(TEXTURE))
}

pub fn pass_end(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
{
    trace!("finished pass #{}", summary(ctx)?.passes);
    Ok(Flow::Continue)
}

pub fn texture_image(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::path).ok_or("expected an image path")?;
    Ok(Flow::Continue)
}

pub fn texture_channel(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::checked).ok_or("expected a channel")?;
    Ok(Flow::Continue)
}

pub fn texture_levels(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::uint32).ok_or("expected a mip level count")?;
    Ok(Flow::Continue)
}

pub fn texture_crop(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::rectangle).ok_or("expected a rectangle")?;
    Ok(Flow::Continue)
}

pub fn texture_sampler(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    name_param(params, "sampler")?;
    Ok(Flow::Continue)
}

pub fn sampler_filter(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::checked).ok_or("expected a filter mode")?;
    Ok(Flow::Continue)
}

pub fn sampler_border_colour(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::colour).ok_or("expected a colour")?;
    Ok(Flow::Continue)
}

pub fn sampler_max_anisotropy(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected a factor")?;
    Ok(Flow::Continue)
}

pub fn sampler_lod_bias(_: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
{
    params.first().and_then(Value::float).ok_or("expected a bias")?;
    Ok(Flow::Continue)
}
