/// Shape descriptor parser for strings like `cone r=1 h=2`
use nom::{
    character::complete::{alpha1, char, multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::{preceded, separated_pair},
    IResult,
};

use crate::error::{Error, Result};
use crate::shapes::{Cone, Cube, Cylinder, Pyramid, Shape};

/// Parse a descriptor into a ready-to-use shape.
///
/// The grammar is a shape name followed by optional `key=value` parameters;
/// omitted parameters take the shape's defaults. Unknown shapes or keys and
/// non-positive values are rejected.
pub fn parse_shape(input: &str) -> Result<Box<dyn Shape>> {
    let (rest, (name, pairs)) =
        parse_descriptor(input).map_err(|err| Error::Parse(err.to_string()))?;
    if !rest.is_empty() {
        return Err(Error::Parse(format!("unexpected trailing input {:?}", rest)));
    }

    match name {
        "cone" => {
            let [r, h] = take_params(&pairs, ["r", "h"], [1.0, 2.0])?;
            Ok(Box::new(Cone::new(r, h)))
        }
        "cylinder" => {
            let [r, h] = take_params(&pairs, ["r", "h"], [1.0, 2.0])?;
            Ok(Box::new(Cylinder::new(r, h)))
        }
        "pyramid" => {
            let [s, h] = take_params(&pairs, ["s", "h"], [1.0, 3.0])?;
            Ok(Box::new(Pyramid::new(s, h)))
        }
        "cube" => {
            let [a] = take_params(&pairs, ["a"], [1.0])?;
            Ok(Box::new(Cube::new(a)))
        }
        other => Err(Error::Parse(format!("unknown shape {:?}", other))),
    }
}

fn parse_descriptor(input: &str) -> IResult<&str, (&str, Vec<(&str, f32)>)> {
    let (input, name) = preceded(multispace0, alpha1)(input)?;
    let (input, pairs) = many0(preceded(multispace1, parse_key_value))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (name, pairs)))
}

fn parse_key_value(input: &str) -> IResult<&str, (&str, f32)> {
    separated_pair(alpha1, char('='), float)(input)
}

fn take_params<const N: usize>(
    pairs: &[(&str, f32)],
    keys: [&str; N],
    defaults: [f32; N],
) -> Result<[f32; N]> {
    let mut values = defaults;
    for (key, value) in pairs {
        match keys.iter().position(|k| k == key) {
            Some(i) => {
                if !(*value > 0.0) {
                    return Err(Error::Parse(format!(
                        "{} must be positive, got {}",
                        key, value
                    )));
                }
                values[i] = *value;
            }
            None => return Err(Error::Parse(format!("unknown key {:?}", key))),
        }
    }
    Ok(values)
}
