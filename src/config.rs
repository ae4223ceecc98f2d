/*!

Configuration values from which routings and networks are built.

An `Object` is written `Name { key1 : value1, key2 : value2, [...] }`, an `Array` `[value1, value2, [...]]`. The builders in this crate read them with the `match_object!` macro, which rejects unknown fields.

*/

use std::fmt::{Display,Formatter,Error as FmtError};

use crate::error::Error;
use crate::source_location;

#[derive(Clone,Debug,PartialEq,PartialOrd)]
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	True,
	False,
	None,
}

impl Default for ConfigurationValue
{
	fn default() -> ConfigurationValue
	{
		ConfigurationValue::None
	}
}

impl ConfigurationValue
{
	///Shorthand to build an object from string slices.
	pub fn object(name:&str, pairs:Vec<(&str,ConfigurationValue)>) -> ConfigurationValue
	{
		ConfigurationValue::Object(name.to_string(),pairs.into_iter().map(|(key,value)|(key.to_string(),value)).collect())
	}
	pub fn number(value:usize) -> ConfigurationValue
	{
		ConfigurationValue::Number(value as f64)
	}
	fn write(&self, f: &mut Formatter, indent:usize) -> Result<(),FmtError>
	{
		let is=String::from("\t").repeat(indent);
		write!(f,"{}",is)?;
		match self
		{
			ConfigurationValue::Literal(s) => write!(f,"\"{}\"",s)?,
			ConfigurationValue::Number(v) => write!(f,"{}",v)?,
			ConfigurationValue::Object(name, list) =>
			{
				if list.is_empty()
				{
					write!(f,"{}",name)?;
				}
				else
				{
					writeln!(f,"{}\n{}{{",name,is)?;
					for (attr_name,attr_value) in list.iter()
					{
						writeln!(f,"{}\t{}:",is,attr_name)?;
						attr_value.write(f,indent+1)?;
						writeln!(f,",")?;
					}
					write!(f,"{}}}",is)?;
				}
			},
			ConfigurationValue::Array(list) =>
			{
				writeln!(f,"[")?;
				for elem in list.iter()
				{
					elem.write(f,indent+1)?;
					writeln!(f,",")?;
				}
				write!(f,"{}]",is)?;
			},
			ConfigurationValue::True => write!(f,"true")?,
			ConfigurationValue::False => write!(f,"false")?,
			ConfigurationValue::None => write!(f,"NONE VALUE")?,
		};
		Ok(())
	}
	fn ill_formed(&self, what:&str) -> Error
	{
		Error::ill_formed_configuration(source_location!(),self.clone()).with_message(format!("expected {}",what))
	}
	pub fn as_f64(&self) -> Result<f64,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) => Ok(x),
			_ => Err(self.ill_formed("a number")),
		}
	}
	///A number that must be a non-negative integer.
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		let x=self.as_f64()?;
		if x<0.0 || x.fract()!=0.0
		{
			return Err(self.ill_formed("a non-negative integer"));
		}
		Ok(x as usize)
	}
	pub fn as_array(&self) -> Result<&Vec<ConfigurationValue>,Error>
	{
		match self
		{
			ConfigurationValue::Array(a) => Ok(a),
			_ => Err(self.ill_formed("an array")),
		}
	}
	///The name and fields of an `Object`.
	pub fn as_object(&self) -> Result<(&str,&Vec<(String,ConfigurationValue)>),Error>
	{
		match self
		{
			ConfigurationValue::Object(name,pairs) => Ok((name.as_str(),pairs)),
			_ => Err(self.ill_formed("an object")),
		}
	}
}

impl Display for ConfigurationValue
{
	fn fmt(&self,f:&mut Formatter) -> Result<(),FmtError>
	{
		self.write(f,0)
	}
}

/// Iterate over the fields of an object named `$name`, binding each value to `$valueid` and running the arm of its key.
/// The field `legend_name` is always accepted and ignored. Any other unlisted field makes the enclosing function return an `IllFormedConfiguration` error.
/// ```ignore
/// let mut k=None;
/// match_object!(cv,"Ring",value,
/// 	"k" => k=Some(value.as_usize()?),
/// );
/// ```
#[macro_export]
macro_rules! match_object{
	($cv:expr, $name:expr, $valueid:ident, $($key:literal => $arm:expr),* $(,)?) => {{
		let (cv_name,cv_pairs)=$cv.as_object()?;
		if cv_name!=$name
		{
			return Err($crate::error::Error::ill_formed_configuration($crate::source_location!(),$cv.clone())
				.with_message(format!("A {} must be created from a `{}` object not `{}`",$name,$name,cv_name)));
		}
		for (name,$valueid) in cv_pairs.iter()
		{
			match name.as_str()
			{
				$( $key => { $arm; }, )*
				"legend_name" => { let _ = $valueid; },
				_ => return Err($crate::error::Error::ill_formed_configuration($crate::source_location!(),$cv.clone())
					.with_message(format!("Nothing to do with field {} in {}",name,$name))),
			}
		}
	}};
}
