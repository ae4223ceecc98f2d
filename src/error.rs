/*!

Errors of greedy-routing-lib. A routing decision is a pure function of the network and its occupancy, so there is nothing to retry: every error here is a precondition violation made by the caller or by whoever built the network.

Instead of `expect` or `unwrap_or_else` try
* `ok_or_else` like in `.ok_or_else( ||Error::unknown_address(source_location!(),address,num_nodes) )?;`

Instead of `panic!` try
* Return an error. E.g., by `return Err( Error::new(source_location!(),ErrorKind::EmptyCandidateList) );`

*/

use std::fmt::{Display,Formatter};

use crate::config::ConfigurationValue;
use crate::network::ChannelIndex;

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug,Clone,Copy)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// An address outside `[0,num_nodes)`.
	UnknownAddress{
		address: usize,
		num_nodes: usize,
	},
	/// A channel index not present in the network.
	UnknownChannel{
		channel: ChannelIndex,
	},
	/// Asked for the far endpoint of a channel from a node that is not one of its endpoints.
	ChannelNotIncident{
		channel: ChannelIndex,
		address: usize,
	},
	/// A node without channels cannot forward anything.
	NoIncidentChannels{
		address: usize,
	},
	/// The selection received nothing to select from.
	EmptyCandidateList,
	/// A path that is not a walk from the current node to the destination.
	IllFormedPath{
		path: Vec<ChannelIndex>,
	},
	/// There is no path between the two nodes.
	NoPath{
		source: usize,
		destination: usize,
	},
	/// The network does not have the size the shape of the routing requires.
	ShapeMismatch{
		expected_nodes: usize,
		found_nodes: usize,
	},
	/// Topology parameters that do not describe a network, such as a torus with a side of zero.
	InvalidShape,
	/// A configuration value that could not be understood.
	IllFormedConfiguration{
		value: ConfigurationValue,
	},
	/// No builder for a routing of this name.
	UnknownRouting{
		name: String,
	},
	/// No builder for a topology of this name.
	UnknownTopology{
		name: String,
	},
	/// Removing load from a channel that has none.
	EmptyChannel{
		channel: ChannelIndex,
	},
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		$crate::error::SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		self.message=Some(message);
		self
	}
	pub fn unknown_address(source_location:SourceLocation,address:usize,num_nodes:usize) -> Error
	{
		Error::new(source_location,UnknownAddress{address,num_nodes})
	}
	pub fn unknown_channel(source_location:SourceLocation,channel:ChannelIndex) -> Error
	{
		Error::new(source_location,UnknownChannel{channel})
	}
	pub fn channel_not_incident(source_location:SourceLocation,channel:ChannelIndex,address:usize) -> Error
	{
		Error::new(source_location,ChannelNotIncident{channel,address})
	}
	pub fn no_incident_channels(source_location:SourceLocation,address:usize) -> Error
	{
		Error::new(source_location,NoIncidentChannels{address})
	}
	pub fn empty_candidate_list(source_location:SourceLocation) -> Error
	{
		Error::new(source_location,EmptyCandidateList)
	}
	pub fn ill_formed_path(source_location:SourceLocation,path:Vec<ChannelIndex>) -> Error
	{
		Error::new(source_location,IllFormedPath{path})
	}
	pub fn no_path(source_location:SourceLocation,source:usize,destination:usize) -> Error
	{
		Error::new(source_location,NoPath{source,destination})
	}
	pub fn shape_mismatch(source_location:SourceLocation,expected_nodes:usize,found_nodes:usize) -> Error
	{
		Error::new(source_location,ShapeMismatch{expected_nodes,found_nodes})
	}
	pub fn invalid_shape(source_location:SourceLocation,message:String) -> Error
	{
		Error::new(source_location,InvalidShape).with_message(message)
	}
	pub fn ill_formed_configuration(source_location:SourceLocation,value:ConfigurationValue) -> Error
	{
		Error::new(source_location,IllFormedConfiguration{value})
	}
	pub fn unknown_routing(source_location:SourceLocation,name:String) -> Error
	{
		Error::new(source_location,UnknownRouting{name})
	}
	pub fn unknown_topology(source_location:SourceLocation,name:String) -> Error
	{
		Error::new(source_location,UnknownTopology{name})
	}
	pub fn empty_channel(source_location:SourceLocation,channel:ChannelIndex) -> Error
	{
		Error::new(source_location,EmptyChannel{channel})
	}
}


impl Display for Error
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl std::error::Error for Error {}

impl Display for ErrorKind
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		match self
		{
			UnknownAddress{address,num_nodes} =>
			{
				writeln!(formatter,"UnknownAddress error: address {} is not in a network of {} nodes.",address,num_nodes)?;
			},
			UnknownChannel{channel} =>
			{
				writeln!(formatter,"UnknownChannel error: there is no channel {}.",channel)?;
			},
			ChannelNotIncident{channel,address} =>
			{
				writeln!(formatter,"ChannelNotIncident error: channel {} does not have {} as endpoint.",channel,address)?;
			},
			NoIncidentChannels{address} =>
			{
				writeln!(formatter,"NoIncidentChannels error: node {} has no channels to route through.",address)?;
			},
			EmptyCandidateList =>
			{
				writeln!(formatter,"EmptyCandidateList error: the selection received no candidates.")?;
			},
			IllFormedPath{path} =>
			{
				writeln!(formatter,"IllFormedPath error: the channels {:?} do not form a path to the destination.",path)?;
			},
			NoPath{source,destination} =>
			{
				writeln!(formatter,"NoPath error: node {} cannot reach node {}.",source,destination)?;
			},
			ShapeMismatch{expected_nodes,found_nodes} =>
			{
				writeln!(formatter,"ShapeMismatch error: the routing expects {} nodes but the network has {}.",expected_nodes,found_nodes)?;
			},
			InvalidShape =>
			{
				writeln!(formatter,"InvalidShape error: the topology parameters do not describe a network.")?;
			},
			IllFormedConfiguration{value} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: could not make sense of the following value.\n{}",value)?;
			},
			UnknownRouting{name} =>
			{
				writeln!(formatter,"UnknownRouting error: there is no routing named {}.",name)?;
			},
			UnknownTopology{name} =>
			{
				writeln!(formatter,"UnknownTopology error: there is no topology named {}.",name)?;
			},
			EmptyChannel{channel} =>
			{
				writeln!(formatter,"EmptyChannel error: channel {} has no load to remove.",channel)?;
			},
		}
		Ok(())
	}
}
